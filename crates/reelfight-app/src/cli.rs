//! Command-line parsing for the `reelfight` binary.
//!
//! Usage:
//!   reelfight run bass.json --difficulty hard --seed 42
//!   reelfight demo

use std::path::PathBuf;

use reelfight_core::commands::FightCommand;
use reelfight_core::enums::{Difficulty, FeedbackMode, FightOutcome};

use crate::error::AppError;

pub const USAGE: &str = "reelfight: fishing fight simulator\n\
     \n\
     Commands:\n\
     \n\
     run <species.json>  Simulate a fight against one species record\n\
     \n\
       --difficulty <d>   easy | medium | hard (default: medium)\n\
       --seed <N>         RNG seed (default: derived from the species id)\n\
       --no-haptics       Disable haptic feedback\n\
       --mode <m>         subtle | detailed | android_continuous\n\
       --fast             Step as fast as possible instead of in real time\n\
     \n\
     demo                Fight the built-in species on every difficulty\n\
     \n\
     While a real-time fight runs, type a command and press enter:\n\
     pause, resume, reset, land, quit, mute, unmute\n";

/// Options for `reelfight run`.
#[derive(Debug, Clone, PartialEq)]
pub struct RunArgs {
    pub species_path: PathBuf,
    pub difficulty: Difficulty,
    pub seed: Option<u64>,
    pub haptics: bool,
    pub mode: FeedbackMode,
    pub fast: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(RunArgs),
    Demo,
    Help,
}

/// Parse arguments, excluding the program name.
pub fn parse_args(args: &[String]) -> Result<Command, AppError> {
    let Some(command) = args.first() else {
        return Err(AppError::Usage("missing command".into()));
    };

    match command.as_str() {
        "run" => parse_run(&args[1..]).map(Command::Run),
        "demo" => Ok(Command::Demo),
        "help" | "--help" | "-h" => Ok(Command::Help),
        other => Err(AppError::Usage(format!("unknown command: {other}"))),
    }
}

fn parse_run(args: &[String]) -> Result<RunArgs, AppError> {
    let mut species_path = None;
    let mut run = RunArgs {
        species_path: PathBuf::new(),
        difficulty: Difficulty::default(),
        seed: None,
        haptics: true,
        mode: FeedbackMode::default(),
        fast: false,
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--difficulty" => run.difficulty = value(&mut iter, arg)?.parse()?,
            "--seed" => {
                let raw = value(&mut iter, arg)?;
                let seed = raw
                    .parse()
                    .map_err(|_| AppError::Usage(format!("invalid seed: {raw}")))?;
                run.seed = Some(seed);
            }
            "--mode" => run.mode = value(&mut iter, arg)?.parse().map_err(AppError::Usage)?,
            "--no-haptics" => run.haptics = false,
            "--fast" => run.fast = true,
            flag if flag.starts_with("--") => {
                return Err(AppError::Usage(format!("unknown option: {flag}")));
            }
            path => {
                if species_path.is_some() {
                    return Err(AppError::Usage(format!("unexpected argument: {path}")));
                }
                species_path = Some(PathBuf::from(path));
            }
        }
    }

    run.species_path =
        species_path.ok_or_else(|| AppError::Usage("missing species file".into()))?;
    Ok(run)
}

/// Map a line typed during a real-time fight to a command.
pub fn parse_input(line: &str) -> Option<FightCommand> {
    let command = match line.trim().to_ascii_lowercase().as_str() {
        "pause" | "p" => FightCommand::Pause,
        "resume" | "r" => FightCommand::Resume,
        "reset" => FightCommand::Reset,
        "land" => FightCommand::End {
            outcome: FightOutcome::Landed,
        },
        "quit" | "q" => FightCommand::End {
            outcome: FightOutcome::Breakoff,
        },
        "mute" => FightCommand::SetHaptics { enabled: false },
        "unmute" => FightCommand::SetHaptics { enabled: true },
        _ => return None,
    };
    Some(command)
}

fn value<'a>(
    iter: &mut impl Iterator<Item = &'a String>,
    flag: &str,
) -> Result<&'a str, AppError> {
    iter.next()
        .map(String::as_str)
        .ok_or_else(|| AppError::Usage(format!("{flag} needs a value")))
}
