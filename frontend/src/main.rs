use std::cell::RefCell;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use clap::Parser;

use lc3sim_core::device::{Display, Keyboard, SharedDevice};
use lc3sim_machines::{Lc3System, read_object_file};

mod repl;
mod terminal;

/// Interactive LC-3 simulator and debugger.
#[derive(Parser)]
#[command(name = "lc3sim", version, about)]
struct Args {
    /// Object file to load before the first prompt.
    program: Option<PathBuf>,

    /// Run the loaded program to completion before entering the debugger.
    #[arg(long)]
    run: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let channel = Arc::new(Mutex::new(terminal::StdioChannel::new()));
    let mut system = Lc3System::new(channel);

    let devices: [SharedDevice; 2] = [
        Rc::new(RefCell::new(Keyboard::new())),
        Rc::new(RefCell::new(Display::new())),
    ];
    for device in devices {
        if let Err(err) = system.attach(device) {
            eprintln!("failed to attach device: {err}");
        }
    }

    if let Some(path) = &args.program {
        match read_object_file(path) {
            Ok(image) => {
                if let Err(err) = system.load_program(&image) {
                    eprintln!("{}: {err}", path.display());
                    return ExitCode::FAILURE;
                }
            }
            Err(err) => {
                eprintln!("{err}");
                return ExitCode::FAILURE;
            }
        }
        if args.run
            && let Err(err) = system.run_until_end()
        {
            eprintln!("terminal error: {err}");
            return ExitCode::FAILURE;
        }
    }

    match repl::run(&mut system) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
