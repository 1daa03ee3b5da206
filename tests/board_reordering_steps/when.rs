//! When steps for board reordering BDD scenarios.

use super::world::{BoardWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use tessera::activity::domain::RequestContext;

#[when(r#"the user moves column "{name}" to position {position:i64}"#)]
fn move_column(world: &mut BoardWorld, name: String, position: i64) -> Result<(), eyre::Report> {
    let column_id = world.column(&name)?;
    run_async(world.columns.move_column(
        world.actor,
        column_id,
        position,
        &RequestContext::absent(),
    ))
    .wrap_err_with(|| format!("move column '{name}'"))?;
    Ok(())
}

#[when(r#"the user moves task "{title}" to column "{column}" at position {position:i64}"#)]
fn move_task(
    world: &mut BoardWorld,
    title: String,
    column: String,
    position: i64,
) -> Result<(), eyre::Report> {
    let task_id = world.task(&title)?;
    let column_id = world.column(&column)?;
    run_async(world.tasks.move_task(
        world.actor,
        task_id,
        column_id,
        position,
        &RequestContext::absent(),
    ))
    .wrap_err_with(|| format!("move task '{title}'"))?;
    Ok(())
}

#[when(r#"the user moves task "{title}" to the foreign column "{column}""#)]
fn move_task_to_foreign_column(
    world: &mut BoardWorld,
    title: String,
    column: String,
) -> Result<(), eyre::Report> {
    let task_id = world.task(&title)?;
    let column_id = world.column(&column)?;
    let result = run_async(world.tasks.move_task(
        world.actor,
        task_id,
        column_id,
        0,
        &RequestContext::absent(),
    ));
    world.last_move_result = Some(result.map(|_| ()));
    Ok(())
}
