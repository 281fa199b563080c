//! Chat room server with identity validation and broadcast.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin banter-server
//! cargo run --bin banter-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use banter_server::{
    infrastructure::{FixedWindowRateLimiter, InMemoryUserRegistry, WebSocketMessagePusher},
    ui::Server,
    usecase::{JoinRoomUseCase, LeaveRoomUseCase, SendMessageUseCase, TypingUseCase},
};
use banter_shared::{logger::setup_logger, time::SystemClock};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Chat room server with broadcast support", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Clock
    // 2. Registry, rate limiter, message pusher
    // 3. UseCases
    // 4. Server

    let clock = Arc::new(SystemClock);

    let registry = Arc::new(InMemoryUserRegistry::new(clock.clone()));
    let limiter = Arc::new(FixedWindowRateLimiter::new(clock.clone()));
    let pusher = Arc::new(WebSocketMessagePusher::new());

    let join_room_usecase = Arc::new(JoinRoomUseCase::new(registry.clone(), pusher.clone()));
    let leave_room_usecase = Arc::new(LeaveRoomUseCase::new(
        registry.clone(),
        limiter.clone(),
        pusher.clone(),
    ));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        registry.clone(),
        limiter.clone(),
        pusher.clone(),
        clock.clone(),
    ));
    let typing_usecase = Arc::new(TypingUseCase::new(registry.clone(), pusher.clone()));

    let server = Server::new(
        join_room_usecase,
        leave_room_usecase,
        send_message_usecase,
        typing_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
