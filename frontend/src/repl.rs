//! The debugger command loop.
//!
//! Commands are case-sensitive and tokens split on spaces and commas.
//! Command-level mistakes print a diagnostic and keep the loop alive;
//! terminal IO failures end it.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Context;

use lc3sim_core::cpu::Reg;
use lc3sim_machines::{AddressRead, Lc3System, LoadError, read_object_file};

const HELP: &str = "help - print this message\n\
    run - execute the program until the clock is disabled\n\
    step [n] - execute up to n instructions (default 1)\n\
    mem read [address] [address2] - display memory between two addresses\n\
    mem write [value] [address] [address2] - set memory between two addresses\n\
    reg read - display all registers\n\
    reg write [value] [register] - set a register (r0..r7, pc, psr, usp, ssp)\n\
    load [file] - load an object file and set the pc\n\
    quit - close the simulator";

enum Status {
    Continue,
    Done,
}

pub fn run(system: &mut Lc3System) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("\ncommand> ");
        io::stdout().flush().context("flushing prompt")?;
        line.clear();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("reading command")?;
        if read == 0 {
            break; // EOF
        }
        let tokens: Vec<&str> = line
            .split([' ', ',', '\t', '\n', '\r'])
            .filter(|token| !token.is_empty())
            .collect();
        match execute(system, &tokens)? {
            Status::Continue => {}
            Status::Done => break,
        }
    }
    Ok(())
}

fn execute(system: &mut Lc3System, tokens: &[&str]) -> anyhow::Result<Status> {
    let Some(&command) = tokens.first() else {
        return Ok(Status::Continue);
    };
    match command {
        "help" => println!("{HELP}"),
        "run" => system.run_until_end().context("terminal error")?,
        "step" => cmd_step(system, tokens),
        "mem" => cmd_mem(system, tokens),
        "reg" => cmd_reg(system, tokens),
        "load" => cmd_load(system, tokens),
        "quit" => return Ok(Status::Done),
        other => println!("{other}: invalid command"),
    }
    Ok(Status::Continue)
}

fn cmd_step(system: &mut Lc3System, tokens: &[&str]) {
    let count = match tokens.get(1) {
        Some(token) => match parse_number(token) {
            Some(count) => count,
            None => {
                println!("step usage: step [count]");
                return;
            }
        },
        None => 1,
    };
    system.step(count);
}

fn cmd_mem(system: &mut Lc3System, tokens: &[&str]) {
    match tokens.get(1) {
        Some(&"read") => {
            let range = tokens.get(2..).unwrap_or(&[]);
            let Some((low, high)) = parse_address_range(range) else {
                println!("mem usage: mem read [address] [address2]");
                return;
            };
            print_memory(system, low, high);
        }
        Some(&"write") => {
            let value = tokens.get(2).and_then(|token| parse_word(token));
            let range = tokens.get(3..).unwrap_or(&[]);
            let (Some(value), Some((low, high))) = (value, parse_address_range(range)) else {
                println!("mem usage: mem write [value] [address] [address2]");
                return;
            };
            for address in low..=high {
                system.write_address(address, value);
            }
        }
        _ => println!("mem usage: mem [read/write] ..."),
    }
}

fn print_memory(system: &Lc3System, low: u16, high: u16) {
    println!("{:<13}{:<13}", "address", "value");
    for address in low..=high {
        let address_str = format!("0x{address:04X}");
        match system.read_address(address) {
            AddressRead::Value(value) => {
                println!("{:<13}{:<13}", address_str, format!("0x{value:04X}"));
            }
            AddressRead::DeviceRegister => {
                println!("{address_str:<13}{:<13}", "DEVICE");
            }
        }
    }
}

fn cmd_reg(system: &mut Lc3System, tokens: &[&str]) {
    match tokens.get(1) {
        Some(&"read") => print_registers(system),
        Some(&"write") => {
            let (Some(value), Some(reg)) = (
                tokens.get(2).and_then(|token| parse_word(token)),
                tokens.get(3).and_then(|token| Reg::parse(token)),
            ) else {
                println!("reg usage: reg write [value] [register]");
                return;
            };
            system.write_register(reg, value);
        }
        _ => println!("reg usage: reg [read/write] ..."),
    }
}

fn print_registers(system: &Lc3System) {
    let line: Vec<String> = Reg::ALL[..8]
        .iter()
        .map(|&reg| format!("{}: 0x{:04X}", reg.name().to_uppercase(), system.read_register(reg)))
        .collect();
    println!("{}", line.join(", "));
    let line: Vec<String> = Reg::ALL[8..]
        .iter()
        .map(|&reg| format!("{}: 0x{:04X}", reg.name().to_uppercase(), system.read_register(reg)))
        .collect();
    println!("{}", line.join(", "));
}

fn cmd_load(system: &mut Lc3System, tokens: &[&str]) {
    let Some(&path) = tokens.get(1) else {
        println!("load usage: load [filename]");
        return;
    };
    match read_object_file(Path::new(path)) {
        Ok(image) => {
            if let Err(err) = system.load_program(&image) {
                println!("{path}: {err}");
            }
        }
        // The Io variant already carries the path.
        Err(err @ LoadError::Io { .. }) => println!("{err}"),
        Err(err) => println!("{path}: {err}"),
    }
}

/// One address, or an inclusive pair; a single address stands for itself.
fn parse_address_range(tokens: &[&str]) -> Option<(u16, u16)> {
    let low = parse_word(tokens.first()?)?;
    let high = match tokens.get(1) {
        Some(token) => parse_word(token)?,
        None => low,
    };
    Some((low, high))
}

/// Decimal, or hexadecimal with a `0x`/`0X` prefix.
fn parse_number(token: &str) -> Option<u64> {
    if let Some(hex) = token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).ok()
    } else {
        token.parse().ok()
    }
}

fn parse_word(token: &str) -> Option<u16> {
    parse_number(token).and_then(|value| u16::try_from(value).ok())
}
