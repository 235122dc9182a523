use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};

use goban::app::{App, Signal};
use goban::build_info;
use goban::settings;
use goban::ui;

fn main() -> io::Result<()> {
    let mut size: i32 = 19;
    #[cfg(feature = "web")]
    let mut serve_port: Option<u16> = None;

    for arg in std::env::args().skip(1) {
        if let Some(raw) = arg.strip_prefix("--size=") {
            size = match raw.parse::<i32>() {
                Ok(n) if n == 9 || n == 13 || n == 19 => n,
                _ => {
                    eprintln!("Invalid size {:?}. Use 9, 13, or 19.", raw);
                    std::process::exit(1);
                }
            };
        } else if arg == "--version" || arg == "-v" {
            println!(
                "goban {} ({})",
                build_info::BUILD_DATE,
                build_info::BUILD_COMMIT
            );
            return Ok(());
        } else if arg == "--help" || arg == "-h" {
            print_usage();
            return Ok(());
        } else if arg == "--serve" || arg.starts_with("--serve=") {
            #[cfg(feature = "web")]
            {
                serve_port = Some(
                    arg.strip_prefix("--serve=")
                        .and_then(|p| p.parse().ok())
                        .unwrap_or(8080),
                );
            }
            #[cfg(not(feature = "web"))]
            {
                eprintln!("This build has no web support. Rebuild with --features web.");
                std::process::exit(1);
            }
        } else {
            eprintln!("Unknown argument: {}", arg);
            eprintln!("Run 'goban --help' for usage.");
            std::process::exit(1);
        }
    }

    #[cfg(feature = "web")]
    if let Some(port) = serve_port {
        return goban::web::serve(port, size);
    }

    run_terminal(size)
}

fn print_usage() {
    println!("goban - terminal Go with vim keybindings\n");
    println!("Usage: goban [options]\n");
    println!("Options:");
    println!("  --size=N     Board size: 9, 13, or 19 (default 19)");
    #[cfg(feature = "web")]
    println!("  --serve[=P]  Serve sessions over websocket on port P (default 8080)");
    println!("  --version    Show version information");
    println!("  --help       Show this help message");
}

fn run_terminal(size: i32) -> io::Result<()> {
    let mut app = App::new(size, settings::load());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app);

    // Restore the terminal even if the loop errored.
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
            {
                return Ok(());
            }
            if app.handle_key(key) == Signal::Quit {
                return Ok(());
            }
        }
    }
}
