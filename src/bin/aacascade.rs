//! aacascade command-line driver
//!
//! Runs a cascade session from a line-oriented script on stdin and paints it
//! to the terminal. Time is virtual: it starts at 0 and only `wait` moves it.

use std::io::{self, BufRead};
use std::path::PathBuf;

use aacascade::{
    CascadeResult, CascadeSession, DrugEffectTable, DrugId, ExplanationCatalog, InputMode,
    NodeId, ReadoutKey, ReadoutState, Renderer, SessionConfig, TooltipContent, TooltipTarget,
};

/// Driver options
struct Options {
    touch: bool,
    config: Option<PathBuf>,
    effects: Option<PathBuf>,
    json: bool,
}

fn print_help() {
    println!("aacascade - arachidonic acid cascade teaching model");
    println!();
    println!("USAGE:");
    println!("    aacascade [OPTIONS] < script");
    println!();
    println!("OPTIONS:");
    println!("        --touch               Use the touch input model");
    println!("        --config <FILE>       Session config (JSON)");
    println!("        --effects <FILE>      Drug effect table (JSON) [default: built-in]");
    println!("        --json                Print `show` as JSON snapshots");
    println!("    -h, --help                Print help information");
    println!();
    println!("COMMANDS (one per line):");
    println!("    trigger | apply <drug> | reset | show | wait <ms>");
    println!("    hover <id> | leave <id> | enter-tooltip | leave-tooltip");
    println!("    tap <id> | press <id> | move | release | long-press <id>");
    println!("    outside | term <index> | quit");
}

fn parse_args() -> Options {
    let args: Vec<String> = std::env::args().collect();
    let mut options = Options {
        touch: false,
        config: None,
        effects: None,
        json: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--touch" => {
                options.touch = true;
                i += 1;
            }
            "--json" => {
                options.json = true;
                i += 1;
            }
            "--config" | "--effects" => {
                if i + 1 < args.len() {
                    let path = Some(PathBuf::from(&args[i + 1]));
                    if args[i] == "--config" {
                        options.config = path;
                    } else {
                        options.effects = path;
                    }
                    i += 2;
                } else {
                    eprintln!("error: {} requires a value", args[i]);
                    std::process::exit(1);
                }
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            arg => {
                eprintln!("error: unknown argument: {arg}");
                std::process::exit(1);
            }
        }
    }

    options
}

/// Prints renderer commands that change what the user sees. Readouts and
/// node visuals are printed on `show` instead of on every repaint.
struct TerminalRenderer {
    quiet: bool,
}

impl Renderer for TerminalRenderer {
    fn set_readout(&mut self, _key: ReadoutKey, _state: &ReadoutState) {}

    fn set_node_inhibited(&mut self, _node: NodeId, _inhibited: bool) {}

    fn reveal_cascade_diagram(&mut self, visible: bool) {
        if !self.quiet {
            println!("[diagram {}]", if visible { "revealed" } else { "hidden" });
        }
    }

    fn set_trigger_control_enabled(&mut self, enabled: bool) {
        if !self.quiet {
            println!("[trigger {}]", if enabled { "enabled" } else { "disabled" });
        }
    }

    fn show_tooltip(&mut self, content: &TooltipContent, anchor: &str) {
        if !self.quiet {
            println!("[tooltip @{anchor}] {}: {}", content.title, content.body.plain());
        }
    }

    fn hide_tooltip(&mut self) {
        if !self.quiet {
            println!("[tooltip hidden]");
        }
    }

    fn show_notice(&mut self, message: &str) {
        eprintln!("notice: {message}");
    }

    fn set_expanded_term(&mut self, index: Option<usize>) {
        if !self.quiet {
            match index {
                Some(i) => println!("[term {i} expanded]"),
                None => println!("[terms collapsed]"),
            }
        }
    }
}

fn print_readouts(session: &CascadeSession<TerminalRenderer>) {
    for readout in session.readouts().iter() {
        println!(
            "{:<28} {:<16} ({})",
            readout.key.label(),
            readout.state.status_text,
            readout.state.status
        );
    }
    let inhibited: Vec<&str> = session
        .state()
        .inhibited_nodes()
        .iter()
        .map(|node| node.name())
        .collect();
    if !inhibited.is_empty() {
        println!("inhibited: {}", inhibited.join(", "));
    }
}

fn arg<'a>(command: &str, rest: Option<&'a str>) -> Option<&'a str> {
    if rest.is_none() {
        eprintln!("error: {command} requires an argument");
    }
    rest
}

/// Runs one script line. Returns false on `quit`.
fn run_line(
    session: &mut CascadeSession<TerminalRenderer>,
    now_ms: &mut u64,
    line: &str,
    json: bool,
) -> CascadeResult<bool> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(true);
    };
    let rest = words.next();
    let now = *now_ms;

    match command {
        "trigger" => {
            session.on_trigger();
        }
        "apply" => {
            if let Some(name) = arg(command, rest) {
                let drug: DrugId = name.parse()?;
                // Refusal is already shown as a notice.
                if let Err(err) = session.on_apply_drug(drug, now) {
                    tracing::debug!(%err, "apply refused");
                }
            }
        }
        "reset" => {
            session.on_reset();
        }
        "show" => {
            if json {
                println!("{}", serde_json::to_string(&session.snapshot())?);
            } else {
                print_readouts(session);
            }
        }
        "wait" => {
            if let Some(ms) = arg(command, rest) {
                match ms.parse::<u64>() {
                    Ok(ms) => *now_ms = now.saturating_add(ms),
                    Err(_) => eprintln!("error: invalid duration: {ms}"),
                }
            }
        }
        "hover" => {
            if let Some(id) = arg(command, rest) {
                session.on_hover_enter(TooltipTarget::resolve(id));
            }
        }
        "leave" => {
            if let Some(id) = arg(command, rest) {
                session.on_hover_leave(&TooltipTarget::resolve(id), now);
            }
        }
        "enter-tooltip" => session.on_tooltip_enter(),
        "leave-tooltip" => session.on_tooltip_leave(now),
        "tap" => {
            if let Some(id) = arg(command, rest) {
                if let Err(err) = session.on_tap(TooltipTarget::resolve(id), now) {
                    tracing::debug!(%err, "tap refused");
                }
            }
        }
        "press" => {
            if let Some(id) = arg(command, rest) {
                session.on_press_start(&TooltipTarget::resolve(id), now);
            }
        }
        "move" => session.on_press_move(),
        "release" => session.on_press_end(),
        "long-press" => {
            if let Some(id) = arg(command, rest) {
                session.on_long_press(TooltipTarget::resolve(id));
            }
        }
        "outside" => session.on_outside_tap(now),
        "term" => {
            if let Some(index) = arg(command, rest) {
                match index.parse::<usize>() {
                    Ok(index) => session.on_term_tap(index),
                    Err(_) => eprintln!("error: invalid term index: {index}"),
                }
            }
        }
        "quit" | "exit" => return Ok(false),
        other => eprintln!("error: unknown command: {other}"),
    }

    session.tick(*now_ms);
    Ok(true)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    let options = parse_args();

    let config = match (&options.config, options.touch) {
        (Some(path), false) => SessionConfig::from_path(path)?,
        (Some(path), true) => SessionConfig {
            input_mode: InputMode::Touch,
            ..SessionConfig::from_path(path)?
        },
        (None, true) => SessionConfig::for_mode(InputMode::Touch),
        (None, false) => SessionConfig::default(),
    };
    let table = match &options.effects {
        Some(path) => DrugEffectTable::from_path(path)?,
        None => DrugEffectTable::builtin(),
    };

    let renderer = TerminalRenderer {
        quiet: options.json,
    };
    let mut session =
        CascadeSession::new(config, table, ExplanationCatalog::builtin(), renderer)?;

    let mut now_ms = 0u64;
    for line in io::stdin().lock().lines() {
        let line = line?;
        match run_line(&mut session, &mut now_ms, line.trim(), options.json) {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) => eprintln!("error: {err}"),
        }
    }
    Ok(())
}
