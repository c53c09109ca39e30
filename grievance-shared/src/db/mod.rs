/// Database utilities
///
/// - `pool`: SQLite connection pool creation and health checks
/// - `migrations`: Migration runner
/// - `bootstrap`: First-run admin provisioning

pub mod bootstrap;
pub mod migrations;
pub mod pool;
