use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use rand::{rngs::StdRng, SeedableRng};
use simplelog::{Config, LevelFilter, WriteLogger};

use terminal_snakes::game::{EndReason, GameLoop, Outcome};
use terminal_snakes::ladder::{self, JumpKind, LadderGame, TurnReport};
use terminal_snakes::term::TermManager;

#[derive(Parser)]
#[command(name = "terminal_snakes")]
#[command(version, about = "Snake and Snake and Ladder in the terminal")]
struct Cli {
    /// Write a debug log to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    game: Game,
}

#[derive(Subcommand)]
enum Game {
    /// Real-time Snake, steered with the arrow keys or WASD
    Snake {
        /// Seed for food placement
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Two-player Snake and Ladder
    Ladder {
        /// Seed for dice rolls
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        let file = File::create(path).with_context(|| format!("Failed to create log file {}", path.display()))?;
        WriteLogger::init(LevelFilter::Debug, Config::default(), file).context("Failed to initialize logger")?;
    }

    match cli.game {
        Game::Snake { seed } => play_snake(make_rng(seed)),
        Game::Ladder { seed } => play_ladder(make_rng(seed)),
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => {
            info!("using seed {}", seed);
            StdRng::seed_from_u64(seed)
        },
        None => StdRng::from_entropy(),
    }
}

fn wait_for_enter() -> Result<()> {
    io::stdout().flush()?;
    io::stdin().lock().read_line(&mut String::new()).context("Failed to read from stdin")?;
    Ok(())
}

fn play_snake(rng: StdRng) -> Result<()> {
    println!("===================================");
    println!("       SNAKE GAME");
    println!("===================================");
    println!("\nControls:");
    println!("  Arrow Keys or WASD - Move");
    println!("  Q - Quit");
    println!("\nRules:");
    println!("  - Eat the food (*) to grow");
    println!("  - Don't hit the walls or yourself");
    println!("  - Try to get the highest score!");
    print!("\nPress Enter to start...");
    wait_for_enter()?;

    let outcome = {
        // The terminal is restored when `term` goes out of scope, before the summary prints.
        let mut term = TermManager::setup()?;
        GameLoop::new(rng).run(&mut term)?
    };

    print_summary(&outcome);
    Ok(())
}

fn print_summary(outcome: &Outcome) {
    let headline = match outcome.reason {
        EndReason::BoardFull => "YOU FILLED THE BOARD!",
        EndReason::Quit | EndReason::Collision(_) => "GAME OVER!",
    };

    println!("\n===================================");
    println!("         {}", headline);
    println!("===================================");
    println!("\n  Final Score: {}", outcome.score);
    println!("  Snake Length: {}\n", outcome.length);
    println!("Thanks for playing!\n");
}

fn play_ladder(mut rng: StdRng) -> Result<()> {
    println!("===================================");
    println!("   SNAKE AND LADDER GAME");
    println!("===================================\n");
    println!("Game Rules:");
    println!("1. Two players take turns rolling the dice");
    println!("2. Move forward by the number shown on dice");
    println!("3. If you land on a ladder, climb up!");
    println!("4. If you land on a snake, slide down!");
    println!("5. First to reach {} wins!\n", ladder::BOARD_SIZE);

    println!("Snakes on board:");
    for j in &ladder::SNAKES {
        println!("  {} -> {}", j.start, j.end);
    }
    println!("\nLadders on board:");
    for j in &ladder::LADDERS {
        println!("  {} -> {}", j.start, j.end);
    }

    print!("\nPress Enter to start the game...");
    wait_for_enter()?;

    let mut game = LadderGame::new();

    while !game.is_over() {
        let [p1, p2] = game.positions();
        println!("\n===================================");
        println!("Player {}'s turn", game.current_player() + 1);
        println!("Current positions - Player 1: {}, Player 2: {}", p1, p2);
        print!("Press Enter to roll the dice...");
        wait_for_enter()?;

        let roll = ladder::roll_dice(&mut rng);
        if let Some(report) = game.take_turn(roll) {
            info!("{:?}", report);
            print_turn(&report);
        }
    }

    println!("\nGame Over! Thanks for playing!");
    println!("===================================");
    Ok(())
}

fn print_turn(report: &TurnReport) {
    let player = report.player + 1;
    println!("You rolled: {}", report.roll);

    let landed = match report.landed {
        Some(landed) => landed,
        None => {
            println!("You need exactly {} to win. Stay at {}.", ladder::BOARD_SIZE - report.from, report.from);
            return;
        },
    };

    println!("Player {} moves to position {}", player, landed);

    match report.jump {
        Some((JumpKind::Snake, j)) => println!("Oh no! Snake bite! Sliding down from {} to {}", j.start, j.end),
        Some((JumpKind::Ladder, j)) => println!("Yay! Ladder! Climbing up from {} to {}", j.start, j.end),
        None => {},
    }

    if report.won {
        println!("\nPLAYER {} WINS!", player);
    }
}
