//! Then steps for board reordering BDD scenarios.

use super::world::{BoardWorld, name_list, run_async};
use rstest_bdd_macros::then;
use tessera::board::domain::ordering::{Slot, is_dense};
use tessera::board::ports::BoardRepository;
use tessera::board::services::BoardServiceError;

#[then(r#"the column order is "{names}""#)]
fn column_order_is(world: &mut BoardWorld, names: String) -> Result<(), eyre::Report> {
    let board_id = world.board()?;
    let columns = run_async(world.columns.columns_of_board(world.actor, board_id))
        .map_err(|err| eyre::eyre!("column listing failed: {err}"))?;
    let actual: Vec<String> = columns
        .iter()
        .map(|column| column.name.as_str().to_owned())
        .collect();
    let expected = name_list(&names);
    if actual != expected {
        return Err(eyre::eyre!("expected order {expected:?}, found {actual:?}"));
    }
    Ok(())
}

#[then("the column positions are dense")]
fn column_positions_are_dense(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let board_id = world.board()?;
    let columns = run_async(world.columns.columns_of_board(world.actor, board_id))
        .map_err(|err| eyre::eyre!("column listing failed: {err}"))?;
    let slots: Vec<Slot<i64>> = columns
        .iter()
        .map(|column| Slot::new(column.id.value(), column.position))
        .collect();
    if !is_dense(&slots) {
        return Err(eyre::eyre!("column positions are not dense: {slots:?}"));
    }
    Ok(())
}

#[then(r#"column "{column}" contains tasks "{titles}""#)]
fn column_contains_tasks(
    world: &mut BoardWorld,
    column: String,
    titles: String,
) -> Result<(), eyre::Report> {
    let column_id = world.column(&column)?;
    let tasks = run_async(world.repository.tasks_of_column(column_id))
        .map_err(|err| eyre::eyre!("task listing failed: {err}"))?;
    let actual: Vec<String> = tasks
        .iter()
        .map(|task| task.title.as_str().to_owned())
        .collect();
    let expected = name_list(&titles);
    if actual != expected {
        return Err(eyre::eyre!(
            "expected column '{column}' to hold {expected:?}, found {actual:?}"
        ));
    }
    Ok(())
}

#[then(r#"the board activity log ends with action "{action}""#)]
fn activity_log_ends_with(world: &mut BoardWorld, action: String) -> Result<(), eyre::Report> {
    let entries = world
        .activity
        .all_entries()
        .map_err(|err| eyre::eyre!("activity read failed: {err}"))?;
    let last = entries
        .last()
        .ok_or_else(|| eyre::eyre!("activity log is empty"))?;
    if last.payload.action() != action {
        return Err(eyre::eyre!(
            "expected last action '{action}', found '{}'",
            last.payload.action()
        ));
    }
    Ok(())
}

#[then("the move is rejected as a cross-board move")]
fn move_rejected_cross_board(world: &BoardWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_move_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing move result in scenario world"))?;
    if !matches!(result, Err(BoardServiceError::CrossBoard { .. })) {
        return Err(eyre::eyre!("expected a cross-board rejection, got {result:?}"));
    }
    Ok(())
}

#[then(r#"the task "{title}" is still in column "{column}""#)]
fn task_still_in_column(
    world: &mut BoardWorld,
    title: String,
    column: String,
) -> Result<(), eyre::Report> {
    let task_id = world.task(&title)?;
    let column_id = world.column(&column)?;
    let task = run_async(world.repository.find_task(task_id))
        .map_err(|err| eyre::eyre!("task lookup failed: {err}"))?
        .ok_or_else(|| eyre::eyre!("task '{title}' disappeared"))?;
    if task.column_id != column_id {
        return Err(eyre::eyre!(
            "expected task '{title}' in column '{column}', found column {}",
            task.column_id
        ));
    }
    Ok(())
}
