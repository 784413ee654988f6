use std::{error::Error, fs, path::Path};

use maze_mice::{
    algo::tabular::{ValueAgent, ValueAgentConfig},
    experiment::{self, ExperimentConfig},
    gym::Maze,
};

const SEED: u64 = 0;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().init();

    let path = Path::new("demos/maze_mice");
    fs::create_dir_all(path.join("out"))?;

    let configs = [
        ExperimentConfig::default(),
        ExperimentConfig {
            alpha: 0.99,
            ..Default::default()
        },
    ];

    let mut wtr = csv::Writer::from_path(path.join("out/data.csv"))?;
    wtr.write_record(["alpha", "episode", "steps"])?;

    for config in &configs {
        let history = experiment::run(config, SEED)?;
        for (i, steps) in history.iter().enumerate() {
            wtr.write_record(&[config.alpha.to_string(), i.to_string(), steps.to_string()])?;
        }
        let tail = &history[history.len().saturating_sub(100)..];
        log::info!(
            "alpha {}: last {} episodes averaged {:.1} steps",
            config.alpha,
            tail.len(),
            tail.iter().sum::<u32>() as f64 / tail.len().max(1) as f64
        );
    }

    wtr.flush()?;

    // Retrain once to show the learned values laid over the maze
    let mut maze = Maze::new();
    let mut agent = ValueAgent::seeded(&maze, ValueAgentConfig::new(0.99, 0.25)?, SEED)?;
    for _ in 0..3000 {
        agent.go(&mut maze, 1000)?;
        maze = Maze::new();
    }
    println!("{maze}");
    println!("{}", maze.render_values(agent.value_table()));

    Ok(())
}
