use grid_dispatch::{describe_path, GridError, Session};
use std::thread;
use std::time::Duration;

// A console stand-in for the interactive front end. The layout below is
// "clicked" into a 10x10 grid:
//  __________
// |S         |
// |####### # |
// |          |
// | ######## |
// |      #   |
// |      # H |
// |          |
// |          |
// |          |
// |          |
//  __________
// where
// - # marks an obstacle
// - S marks the truck's starting cell
// - H marks the hazard
//
// The truck's route is then replayed one step every 300ms.

const OBSTACLES: &[(usize, usize)] = &[
    (1, 0),
    (1, 1),
    (1, 2),
    (1, 3),
    (1, 4),
    (1, 5),
    (1, 6),
    (1, 8),
    (3, 1),
    (3, 2),
    (3, 3),
    (3, 4),
    (3, 5),
    (3, 6),
    (3, 7),
    (3, 8),
    (4, 6),
    (5, 6),
];
const HAZARD: (usize, usize) = (5, 8);
const STEP_DELAY: Duration = Duration::from_millis(300);

fn main() -> Result<(), GridError> {
    let mut session = Session::default();
    session.select_obstacle_mode();
    for &(row, col) in OBSTACLES {
        session.on_cell_clicked(row, col)?;
    }
    session.select_hazard_mode();
    session.on_cell_clicked(HAZARD.0, HAZARD.1)?;
    println!("{}", session.grid());

    let path = match session.run_search() {
        Ok(path) if path.is_empty() => {
            println!("No path found!");
            return Ok(());
        }
        Ok(path) => path,
        Err(GridError::NoHazardSet) => {
            println!("Hazard position not set!");
            return Ok(());
        }
        Err(e) => return Err(e),
    };
    println!("Shortest path: {}", describe_path(&path));

    let mut driver = session.replay(&path)?;
    while let Some(step) = driver.next() {
        println!(
            "\x07Step {}/{} -> ({}, {})",
            step.index + 1,
            step.total,
            step.row(),
            step.col()
        );
        println!("{}", driver.grid());
        if !step.is_last() {
            thread::sleep(STEP_DELAY);
        }
    }
    Ok(())
}
