use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::Parser;
use sayura::{Capabilities, KeyEvent, KeySym, Session, Settings, SettingsError};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sayura", about = "Type phonetic Sinhala on stdin (Ctrl+C to quit)")]
struct Cli {
    /// Settings TOML file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Log key dispatch to stderr.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

fn key_for(byte: u8) -> KeySym {
    match byte {
        0x08 | 0x7f => KeySym::BackSpace,
        0x1b => KeySym::Escape,
        b' ' => KeySym::Space,
        b if b.is_ascii_graphic() => KeySym::Char(b as char),
        b => KeySym::Other(b as u32),
    }
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "sayura=debug" } else { "sayura=info" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let mut session = Session::with_settings(
        Capabilities {
            client_preedit: true,
        },
        &settings,
    );

    let mut stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    let mut line = String::new();
    let mut buf = [0u8; 1];

    loop {
        if stdin.read(&mut buf)? == 0 {
            break;
        }
        let b = buf[0];

        // Ctrl+C
        if b == 3 {
            break;
        }

        // Enter: flush the unit and start a new line.
        if b == b'\n' {
            line.push_str(&session.commit().committed_text());
            writeln!(stdout, "\r{line}")?;
            line.clear();
            continue;
        }

        let sym = key_for(b);
        let resp = session.handle_key(KeyEvent::press(sym));
        line.push_str(&resp.committed_text());
        if !resp.consumed {
            // The host applies keys the engine let through.
            match sym {
                KeySym::BackSpace => {
                    line.pop();
                }
                KeySym::Space => line.push(' '),
                KeySym::Char(c) => line.push(c),
                _ => {}
            }
        }
        let preedit = session.preedit();
        write!(stdout, "\r{line}{}", preedit.text)?;
        stdout.flush()?;
    }

    let rest = session.deactivate().committed_text();
    if !rest.is_empty() || !line.is_empty() {
        writeln!(stdout, "\r{line}{rest}")?;
    }
    Ok(())
}
