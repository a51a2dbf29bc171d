use pet_arena::{load_config, run, ArenaConfig, CliOptions, Mode};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn usage() -> ! {
    eprintln!(
        "Usage: pet-arena [--config arena.json] [--opponents saved_teams.txt] \
[--team LINE | --team-file FILE] [--turn N] [--seed SEED] [--max-rounds N] \
[--mode fight|evaluate] [--json] [--save]"
    );
    std::process::exit(1);
}

fn parse_args() -> anyhow::Result<CliOptions> {
    let mut config_path: Option<PathBuf> = None;
    let mut opponents_path: Option<PathBuf> = None;
    let mut team: Option<String> = None;
    let mut team_path: Option<PathBuf> = None;
    let mut turn: Option<u32> = None;
    let mut seed: Option<u64> = None;
    let mut max_rounds: Option<usize> = None;
    let mut mode = Mode::Fight;
    let mut json = false;
    let mut save = false;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                config_path = Some(args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--config requires a path (e.g. --config arena.json)")
                })?);
            }
            "--opponents" => {
                opponents_path = Some(args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--opponents requires a path to the saved teams file")
                })?);
            }
            "--team" => {
                team = Some(
                    args.next()
                        .ok_or_else(|| anyhow::anyhow!("--team requires a team line"))?,
                );
            }
            "--team-file" => {
                team_path = Some(
                    args.next()
                        .map(PathBuf::from)
                        .ok_or_else(|| anyhow::anyhow!("--team-file requires a path"))?,
                );
            }
            "--turn" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--turn requires a number"))?;
                turn = Some(val.parse()?);
            }
            "--seed" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--seed requires a number"))?;
                seed = Some(val.parse()?);
            }
            "--max-rounds" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--max-rounds requires a number"))?;
                max_rounds = Some(val.parse()?);
            }
            "--mode" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--mode requires fight or evaluate"))?;
                mode = match val.to_ascii_lowercase().as_str() {
                    "fight" => Mode::Fight,
                    "evaluate" | "eval" => Mode::Evaluate,
                    other => anyhow::bail!("Unknown mode {other} (use fight or evaluate)"),
                };
            }
            "--json" => json = true,
            "--save" => save = true,
            "--help" | "-h" => usage(),
            other => return Err(anyhow::anyhow!("Unknown argument {other}")),
        }
    }

    let mut config = match config_path {
        Some(path) => load_config(&path)?,
        None => ArenaConfig::default(),
    };
    if let Some(path) = opponents_path {
        config.opponents_path = path;
    }
    if let Some(seed) = seed {
        config.seed = seed;
    }
    if let Some(max_rounds) = max_rounds {
        if max_rounds == 0 {
            anyhow::bail!("--max-rounds must be > 0");
        }
        config.max_micro_rounds = max_rounds;
    }

    let team = match (team, team_path) {
        (Some(line), None) => line,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .map_err(|err| anyhow::anyhow!("Failed to read team file {}: {err}", path.display()))?
            .lines()
            .find(|line| !line.trim().is_empty())
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("Team file {} is empty", path.display()))?,
        (Some(_), Some(_)) => anyhow::bail!("Use either --team or --team-file, not both"),
        (None, None) => anyhow::bail!("A team is required (--team or --team-file)"),
    };

    Ok(CliOptions {
        config,
        team,
        turn,
        mode,
        json,
        save,
    })
}

fn main() -> anyhow::Result<()> {
    let opts = parse_args()?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&opts.config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    run(opts)
}
