use std::io::Write;
use std::{env, io, process};

use anyhow::Context;
use core::InterpretResult;
use virtual_machine::Vm;

const EX_USAGE: i32 = 64;
const EX_DATAERR: i32 = 65;
const EX_SOFTWARE: i32 = 70;
const EX_IOERR: i32 = 74;

fn main() {
  tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

  let args: Vec<String> = env::args().collect();
  let exit_code = match args.as_slice() {
    [_] => run_repl(),
    [_, path] => match run_file(path) {
      Ok(code) => code,
      Err(error) => {
        tracing::error!(%path, %error, "failed to read source file");
        eprintln!("Error: {error:#}");
        EX_IOERR
      }
    },
    _ => {
      eprintln!("Error: no path specified");
      EX_USAGE
    }
  };
  process::exit(exit_code);
}

/// `structure: wisp <filename>?`. No args reads the REPL; exactly one arg
/// runs that file; anything else is a usage error.
fn run_file(path: &str) -> anyhow::Result<i32> {
  let source = std::fs::read_to_string(path).with_context(|| format!("could not read file '{path}'"))?;

  Ok(match virtual_machine::interpret(&source) {
    InterpretResult::Ok => 0,
    InterpretResult::CompileError => EX_DATAERR,
    InterpretResult::RuntimeError => EX_SOFTWARE,
  })
}

/// Reads one line at a time from stdin and interprets it immediately: a
/// syntax or runtime error in one line reports to stderr but does not end
/// the session. Exits cleanly at EOF (`Ctrl-D`). Holds one `Vm` for the
/// whole session (spec.md §5: "the REPL ... call `init_vm` once"), so
/// globals and interned strings from one line are visible on the next —
/// `let x = 42;` followed by `print x;` prints `42` instead of failing.
fn run_repl() -> i32 {
  let mut vm = Vm::new();

  print!("> ");
  if io::stdout().flush().is_err() {
    return EX_IOERR;
  }

  let mut line = String::new();
  while io::stdin().read_line(&mut line).unwrap_or(0) > 0 {
    vm.interpret(&line);
    line.clear();
    print!("> ");
    if io::stdout().flush().is_err() {
      return EX_IOERR;
    }
  }
  println!();
  0
}

