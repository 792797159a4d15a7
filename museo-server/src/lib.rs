//! Museo Server - museum back-office service
//!
//! # Overview
//!
//! Back-office API for a museum: exhibition rooms, events, inventory
//! stock, ticket reservations and user accounts, with PDF ticket
//! generation and Excel report export.
//!
//! # Module layout
//!
//! ```text
//! museo-server/src/
//! ├── core/       # configuration, state, server bootstrap
//! ├── auth/       # JWT authentication and role middleware
//! ├── db/         # embedded SurrealDB: models and repositories
//! ├── services/   # stock transactions, totals, Excel, PDF
//! ├── api/        # HTTP routes and handlers
//! └── utils/      # error envelope, logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Prepare the process environment: env file, working directories, logging
pub fn setup_environment(config: &Config) -> std::io::Result<()> {
    config.ensure_work_dir_structure()?;

    let log_level = std::env::var("LOG_LEVEL").ok();
    let logs_dir = config.logs_dir();
    if config.is_production() {
        init_logger_with_file(log_level.as_deref(), logs_dir.to_str());
    } else {
        init_logger_with_file(log_level.as_deref(), None);
    }

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    __  ___
   /  |/  /_  __________  ____
  / /|_/ / / / / ___/ _ \/ __ \
 / /  / / /_/ (__  )  __/ /_/ /
/_/  /_/\__,_/____/\___/\____/
   back-office server
    "#
    );
}
