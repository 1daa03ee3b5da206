//! Given steps for board reordering BDD scenarios.

use super::world::{BoardWorld, name_list, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use tessera::access::domain::MemberRole;
use tessera::access::ports::MembershipRepository;
use tessera::activity::domain::RequestContext;
use tessera::board::domain::ColumnName;
use tessera::board::ports::BoardRepository;

#[given("an empty board owned by the acting user")]
fn an_empty_board(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let board_id = world
        .repository
        .create_board("Scenario board")
        .wrap_err("seed scenario board")?;
    run_async(
        world
            .memberships
            .add_member(board_id, world.actor, MemberRole::Owner),
    )
    .wrap_err("seed board owner")?;
    world.board_id = Some(board_id);
    Ok(())
}

#[given(r#"the board has columns "{names}""#)]
fn the_board_has_columns(world: &mut BoardWorld, names: String) -> Result<(), eyre::Report> {
    let board_id = world.board()?;
    for name in name_list(&names) {
        let column = run_async(world.columns.create_column(
            world.actor,
            board_id,
            name.clone(),
            &RequestContext::absent(),
        ))
        .wrap_err_with(|| format!("seed column '{name}'"))?;
        world.column_ids.insert(name, column.id);
    }
    Ok(())
}

#[given(r#"a task "{title}" in column "{column}""#)]
fn a_task_in_column(
    world: &mut BoardWorld,
    title: String,
    column: String,
) -> Result<(), eyre::Report> {
    let column_id = world.column(&column)?;
    let task = run_async(world.tasks.create_task(
        world.actor,
        column_id,
        title.clone(),
        &RequestContext::absent(),
    ))
    .wrap_err_with(|| format!("seed task '{title}'"))?;
    world.task_ids.insert(title, task.id);
    Ok(())
}

#[given(r#"another board with a column "{name}""#)]
fn another_board_with_a_column(world: &mut BoardWorld, name: String) -> Result<(), eyre::Report> {
    let foreign_board = world
        .repository
        .create_board("Foreign board")
        .wrap_err("seed foreign board")?;
    let column_name = ColumnName::new(name.clone()).wrap_err("valid foreign column name")?;
    let column = run_async(world.repository.create_column(foreign_board, &column_name))
        .wrap_err_with(|| format!("seed foreign column '{name}'"))?;
    world.column_ids.insert(name, column.id);
    Ok(())
}
