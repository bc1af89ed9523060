// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nanostep-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nanostep and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Nanostep CLI entrypoint.
//!
//! By default this checks the program against the evaluator and opens the interactive stepper.
//! Use `--print` for a one-shot report on stdout, or `--graph` to step through a saved
//! `/check` response without contacting the evaluator.

use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::Duration;

use nanostep::check::{
    decode_response, demos::demo_names, find_demo, infer_function_name, CheckClient,
    DEFAULT_SERVER, DEFAULT_TIMEOUT,
};
use nanostep::model::Terminal;
use nanostep::render::render_chain;
use nanostep::ui::UiState;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "NANOSTEP_LOG";
const DEFAULT_LOG_FILTER: &str = "info";

fn print_usage(program: &str) {
    let demos = demo_names().collect::<Vec<_>>().join(", ");
    eprintln!(
        "Usage:\n  {program} [<program-file>] [--function <name>] [--server <url>] [--timeout-secs <n>] [--print] [--log-file <path>]\n  {program} [--program <file>] [--function <name>] [--server <url>] [--timeout-secs <n>] [--print] [--log-file <path>]\n  {program} --demo <name> [--function <name>] [--server <url>] [--print]\n  {program} --graph <response.json> [<program-file> | --demo <name>] [--function <name>] [--print]\n\n--function defaults to the last top-level `let` in the program (else `main`).\n--server defaults to {DEFAULT_SERVER}; --timeout-secs defaults to {}.\n--demo picks a built-in program ({demos}); names are matched fuzzily.\n--graph loads a saved /check response and never contacts the evaluator.\n--print writes the outcome, annotations and initial chain to stdout instead of opening the TUI.\n\nLogs are filtered by ${LOG_ENV} (default `{DEFAULT_LOG_FILTER}`); they go to --log-file, or to stderr with --print.",
        DEFAULT_TIMEOUT.as_secs()
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    program_file: Option<String>,
    function: Option<String>,
    server: Option<String>,
    timeout_secs: Option<u64>,
    demo: Option<String>,
    graph_file: Option<String>,
    print: bool,
    log_file: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    fn take_value(
        slot: &mut Option<String>,
        args: &mut impl Iterator<Item = String>,
    ) -> Result<(), ()> {
        if slot.is_some() {
            return Err(());
        }
        let value = args.next().ok_or(())?;
        if value.starts_with("--") {
            return Err(());
        }
        *slot = Some(value);
        Ok(())
    }

    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--program" => take_value(&mut options.program_file, &mut args)?,
            "--function" => take_value(&mut options.function, &mut args)?,
            "--server" => take_value(&mut options.server, &mut args)?,
            "--demo" => take_value(&mut options.demo, &mut args)?,
            "--graph" => take_value(&mut options.graph_file, &mut args)?,
            "--log-file" => take_value(&mut options.log_file, &mut args)?,
            "--timeout-secs" => {
                if options.timeout_secs.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let secs: u64 = raw.parse().map_err(|_| ())?;
                if secs == 0 {
                    return Err(());
                }
                options.timeout_secs = Some(secs);
            }
            "--print" => {
                if options.print {
                    return Err(());
                }
                options.print = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.program_file.is_some() {
                    return Err(());
                }
                options.program_file = Some(arg);
            }
        }
    }

    if options.demo.is_some() && options.program_file.is_some() {
        return Err(());
    }

    if options.graph_file.is_some()
        && (options.server.is_some() || options.timeout_secs.is_some())
    {
        return Err(());
    }

    if options.program_file.is_none() && options.demo.is_none() && options.graph_file.is_none() {
        return Err(());
    }

    Ok(options)
}

fn init_logging(options: &CliOptions) -> Result<(), Box<dyn Error>> {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    if let Some(path) = &options.log_file {
        let file = fs::OpenOptions::new().create(true).append(true).open(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if options.print {
        tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
    }

    Ok(())
}

/// Program text and the function to check by default.
fn load_program(options: &CliOptions) -> Result<(String, String), Box<dyn Error>> {
    if let Some(name) = &options.demo {
        let demo = find_demo(name).ok_or_else(|| format!("unknown demo `{name}`"))?;
        return Ok((demo.source.to_owned(), demo.function.to_owned()));
    }
    let program = match &options.program_file {
        Some(path) => {
            fs::read_to_string(path).map_err(|err| format!("cannot read {path}: {err}"))?
        }
        None => String::new(),
    };
    let function = infer_function_name(&program);
    Ok((program, function))
}

/// Writes the outcome, annotations and the initial visible chain.
fn write_report(out: &mut impl Write, state: &UiState) -> io::Result<()> {
    if let Some(notice) = state.notice() {
        writeln!(out, "{}", notice.message)?;
    }

    if let Some(session) = state.session() {
        let index = session.index();
        match session.terminal() {
            Terminal::Value(term) => {
                let value = index.term(term).map(|term| term.plain_label()).unwrap_or_default();
                writeln!(out, "{} evaluates to {value}", state.function())?;
            }
            Terminal::Stuck { reason, .. } => {
                writeln!(out, "{} gets stuck: {reason}", state.function())?;
            }
        }
    }

    for annotation in state.annotations() {
        writeln!(
            out,
            "{}:{}: {}: {}",
            annotation.range.from.line + 1,
            annotation.range.from.ch + 1,
            annotation.severity,
            annotation.message
        )?;
    }

    if let Some(session) = state.session() {
        writeln!(out)?;
        writeln!(out, "{}", render_chain(session))?;
    }

    Ok(())
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "nanostep".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        init_logging(&options)?;

        let (source, inferred_function) = load_program(&options)?;
        let function = options.function.clone().unwrap_or(inferred_function);
        let mut state = UiState::new(source, function);

        let client = match &options.graph_file {
            Some(path) => {
                let body = fs::read_to_string(path)
                    .map_err(|err| format!("cannot read {path}: {err}"))?;
                let (ticket, _) = state.begin_check();
                state.finish_check(ticket, decode_response(&body));
                None
            }
            None => {
                let server = options.server.as_deref().unwrap_or(DEFAULT_SERVER);
                let timeout =
                    options.timeout_secs.map(Duration::from_secs).unwrap_or(DEFAULT_TIMEOUT);
                Some(CheckClient::new(server, timeout)?)
            }
        };

        if !options.print {
            return nanostep::tui::run(state, client);
        }

        if let Some(client) = client {
            let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
            let (ticket, request) = state.begin_check();
            let result = runtime.block_on(client.check(&request));
            state.finish_check(ticket, result);
        }

        write_report(&mut io::stdout().lock(), &state)?;
        if state.session().is_none() {
            return Err("no reduction graph to show".into());
        }
        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("nanostep: {err}");
        std::process::exit(1);
    }
}
