use clap::Parser;
use qforth::runtime::{
    built_ins::{
        base_words::register_base_words, io_words::register_io_words,
        predefined_words::register_predefined_words,
    },
    error,
    interpreter::{Interpreter, Mode, forth_interpreter::ForthInterpreter},
};
use std::{
    fs::read_to_string,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

/// A small queue-driven Forth.  With no script an interactive prompt is started.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Script to run line by line instead of starting the prompt.
    script: Option<PathBuf>,

    /// Line of code to run before the script or prompt.  May be repeated.
    #[arg(short, long = "eval", value_name = "LINE")]
    eval: Vec<String>,

    /// Do not install the predefined words (square, fib, fib-10).
    #[arg(long)]
    no_prelude: bool,

    /// Skip the banner and the per-line acknowledgement in the prompt.
    #[arg(short, long)]
    quiet: bool,
}

const HELP: &str = "\
Type tokens separated by spaces.  Numbers are pushed, everything else is looked up.
  : name body ;          define a word
  if ... else ... then   branch on the top value, 0 picks the if branch
  words                  list the visible words
  .s                     show the data stack
  bye                    leave";

/// Run every line of a script, stopping at the first failing line.
fn run_script(interpreter: &mut dyn Interpreter, path: &Path) -> error::Result<()> {
    let source = read_to_string(path)?;

    for (index, line) in source.lines().enumerate() {
        if let Err(err) = interpreter.execute_line(line) {
            eprintln!("{}:{}: {}", path.display(), index + 1, err);
            return Err(err);
        }
    }

    if interpreter.mode() != Mode::Executing {
        log::warn!("Script ended while still {}.", interpreter.mode());
    }

    Ok(())
}

/// The interactive prompt.  Errors are reported and the prompt carries on.
fn repl(interpreter: &mut dyn Interpreter, quiet: bool) -> error::Result<()> {
    if !quiet {
        println!("qforth, type h for help");
        println!("----------------");
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        let prompt = match interpreter.mode() {
            Mode::Executing => "-> ",
            Mode::Recording | Mode::Conditional => ".. ",
        };

        print!("{}", prompt);
        stdout.flush()?;

        let mut line = String::new();

        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match line.trim() {
            "bye" => {
                println!("Bye for now!");
                break;
            }

            "h" => println!("{}", HELP),
            "words" => print!("{}", interpreter.dictionary()),
            ".s" => println!("H -> {} <- T", interpreter.stack()),

            command => match interpreter.execute_line(command) {
                Ok(()) if quiet => (),
                Ok(()) => println!("ok"),
                Err(err) => {
                    if err.is_compilation_error() {
                        eprintln!("Definition discarded: {}", err);
                    } else {
                        eprintln!("Error: {}", err);
                    }
                }
            },
        }
    }

    Ok(())
}

fn main() -> error::Result<()> {
    pretty_env_logger::init();

    let args = Args::parse();
    let mut interpreter = ForthInterpreter::new();

    register_base_words(&mut interpreter);
    register_io_words(&mut interpreter);

    if !args.no_prelude {
        register_predefined_words(&mut interpreter);
    }

    for line in &args.eval {
        interpreter.execute_line(line)?;
    }

    match &args.script {
        Some(path) => run_script(&mut interpreter, path),
        None if args.eval.is_empty() => repl(&mut interpreter, args.quiet),
        None => Ok(()),
    }
}
