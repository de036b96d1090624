//! Headless demo runner (default binary).
//!
//! Plays a full seeded game by always taking the swap that removes the most
//! cells, printing the grid and events after every move. Useful as a smoke
//! test of the whole stack and as a usage example for embedders.
//!
//! Usage: `match3 [seed]` (seed defaults to 1).

use anyhow::{Context, Result};

use match3::adapter::{EventMessage, GameDriver};
use match3::engine::best_swap;
use match3::types::{GameConfig, MovePolicy};

fn main() -> Result<()> {
    let seed = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<u32>()
            .with_context(|| format!("invalid seed '{}'", arg))?,
        None => 1,
    };

    // Charge every swap so a bot that always matches still terminates
    let config = GameConfig {
        move_policy: MovePolicy::EverySwap,
        ..GameConfig::default()
    };
    let mut driver = GameDriver::new(config, seed)?;

    println!("match3 demo, seed {}", seed);
    print_grid(&driver);

    let mut move_no = 0u32;
    loop {
        let obs = driver.observe();
        if obs.game_over {
            println!("game over, final score {}", obs.score);
            break;
        }

        let Some(swap) = best_swap(driver.session().board()) else {
            println!("no available move left, score {}", obs.score);
            break;
        };

        move_no += 1;
        driver.tap(swap.a.row, swap.a.col)?;
        let report = driver.tap(swap.b.row, swap.b.col)?;
        println!(
            "move {}: swap {} <-> {}: {} steps, +{} points",
            move_no, swap.a, swap.b, report.steps, report.score_delta
        );

        while let Some(event) = driver.poll_event() {
            match event {
                EventMessage::ScoreChanged {
                    delta,
                    total,
                    chain,
                } => println!("  chain {}: +{} (total {})", chain, delta, total),
                EventMessage::GameOver { final_score } => {
                    println!("  game over event, final score {}", final_score)
                }
            }
        }
        print_grid(&driver);
    }

    Ok(())
}

fn print_grid(driver: &GameDriver) {
    let obs = driver.observe();
    for row in &obs.grid {
        let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        println!("  {}", line.join(" "));
    }
    println!(
        "  score {}  moves {}  phase {:?}",
        obs.score, obs.moves_remaining, obs.phase
    );
}
