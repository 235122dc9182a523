//! Websocket server: one independent game session per connection.

use std::io;
use std::net::SocketAddr;
use std::sync::mpsc as std_mpsc;
use std::time::Duration;

use crossterm::event::KeyEvent;
use futures_util::{SinkExt, StreamExt};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::{Terminal, TerminalOptions, Viewport};
use serde::Deserialize;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;

use crate::app::{App, Signal};
use crate::settings;
use crate::ui;
use crate::web::backend::SessionWriter;

/// Fixed viewport for web sessions; the browser page opens its terminal
/// with the same dimensions.
const SESSION_COLS: u16 = 100;
const SESSION_ROWS: u16 = 32;

/// Run the bridge until the process is killed. Blocks the calling
/// thread on a tokio runtime.
pub fn serve(port: u16, board_size: i32) -> io::Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run(port, board_size))
}

async fn run(port: u16, board_size: i32) -> io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;

    eprintln!("goban listening on ws://localhost:{}/ws", port);
    eprintln!("Open http://localhost:{} in your browser", port);

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, addr, board_size).await {
                        eprintln!("Connection error from {}: {}", addr, e);
                    }
                });
            }
            Err(e) => {
                eprintln!("Accept error: {}", e);
            }
        }
    }
}

/// Serve the page on plain HTTP, or upgrade to a websocket and attach a
/// fresh game session to it.
async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    board_size: i32,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut peek_buf = [0u8; 256];
    let n = stream.peek(&mut peek_buf).await?;
    let request = String::from_utf8_lossy(&peek_buf[..n]);
    if request.starts_with("GET / ") && !request.contains("Upgrade: websocket") {
        return serve_html(stream).await;
    }

    let ws_stream = tokio_tungstenite::accept_async(stream).await?;
    eprintln!("Session connected: {}", addr);
    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    // Frames out of the session, key events into it. The session owns
    // its game; nothing is shared between connections.
    let (frame_tx, mut frame_rx) = mpsc::unbounded_channel::<Vec<u8>>();
    let (key_tx, key_rx) = std_mpsc::channel::<KeyEvent>();

    std::thread::spawn(move || run_session(frame_tx, key_rx, board_size));

    let send_task = tokio::spawn(async move {
        while let Some(frame) = frame_rx.recv().await {
            if ws_sender.send(Message::Binary(frame)).await.is_err() {
                return;
            }
        }
        // Session ended (e.g. :q); tell the browser.
        let _ = ws_sender.send(Message::Close(None)).await;
    });

    while let Some(msg) = ws_receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                if let Some(key) = parse_key_event(&text) {
                    if key_tx.send(key).is_err() {
                        break; // session quit
                    }
                }
            }
            Ok(Message::Close(_)) | Err(_) => break,
            _ => {}
        }
    }

    // Dropping the sender wakes the session loop so it can exit.
    drop(key_tx);
    send_task.abort();
    eprintln!("Session closed: {}", addr);
    Ok(())
}

/// Drive one interactive session on a dedicated blocking thread until
/// the client quits or disconnects.
fn run_session(
    frame_tx: mpsc::UnboundedSender<Vec<u8>>,
    key_rx: std_mpsc::Receiver<KeyEvent>,
    board_size: i32,
) {
    let backend = CrosstermBackend::new(SessionWriter::new(frame_tx));
    let viewport = Viewport::Fixed(Rect::new(0, 0, SESSION_COLS, SESSION_ROWS));
    let Ok(mut terminal) = Terminal::with_options(backend, TerminalOptions { viewport }) else {
        return;
    };
    let mut app = App::new(board_size, settings::load());

    let _ = terminal.clear();
    loop {
        if terminal.draw(|frame| ui::draw(frame, &app)).is_err() {
            return;
        }
        match key_rx.recv_timeout(Duration::from_millis(250)) {
            Ok(key) => {
                if app.handle_key(key) == Signal::Quit {
                    return;
                }
            }
            Err(std_mpsc::RecvTimeoutError::Timeout) => {}
            Err(std_mpsc::RecvTimeoutError::Disconnected) => return,
        }
    }
}

/// Serve the embedded terminal page.
async fn serve_html(
    mut stream: TcpStream,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    use tokio::io::AsyncWriteExt;

    let html = include_str!("../../web/index.html");
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        html.len(),
        html
    );
    stream.write_all(response.as_bytes()).await?;
    Ok(())
}

#[derive(Deserialize)]
struct KeyMessage {
    key: String,
}

/// Parse a browser key message (`{"key":"h"}`) into a crossterm event.
/// Unknown keys are dropped here; raw keyboard data never reaches the
/// game.
fn parse_key_event(text: &str) -> Option<KeyEvent> {
    use crossterm::event::{KeyCode, KeyEventKind, KeyEventState, KeyModifiers};

    let msg: KeyMessage = serde_json::from_str(text).ok()?;
    let code = match msg.key.as_str() {
        "Enter" => KeyCode::Enter,
        "Escape" => KeyCode::Esc,
        "Backspace" => KeyCode::Backspace,
        "Tab" => KeyCode::Tab,
        "ArrowUp" | "Up" => KeyCode::Up,
        "ArrowDown" | "Down" => KeyCode::Down,
        "ArrowLeft" | "Left" => KeyCode::Left,
        "ArrowRight" | "Right" => KeyCode::Right,
        s => {
            let mut chars = s.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(c)
        }
    };

    Some(KeyEvent {
        code,
        modifiers: KeyModifiers::empty(),
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    })
}
