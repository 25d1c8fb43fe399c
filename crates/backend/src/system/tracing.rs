use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Set up the tracing stack.
///
/// Log lines go to:
/// - stdout (with colors)
/// - logs/backend.log next to the executable (without colors)
pub fn initialize() -> anyhow::Result<()> {
    println!("========================================");
    println!("  LOGGING SYSTEM INITIALIZATION");
    println!("========================================\n");

    let log_dir = if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let dir = exe_dir.join("logs");
            println!("✓ Log directory (next to exe): {}", dir.display());
            dir
        } else {
            let dir = std::path::Path::new("target").join("logs");
            println!("ℹ Using default log directory: {}", dir.display());
            dir
        }
    } else {
        let dir = std::path::Path::new("target").join("logs");
        println!("ℹ Using default log directory: {}", dir.display());
        dir
    };

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        println!("✗ ERROR: Cannot create log directory: {}", e);
        println!("  Error kind: {:?}\n", e.kind());
        return Err(anyhow::anyhow!("Cannot create log directory: {}", e));
    }

    let log_file_path = log_dir.join("backend.log");
    println!("✓ Log file path: {}\n", log_file_path.display());

    let log_file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)
    {
        Ok(f) => f,
        Err(e) => {
            println!("✗ ERROR: Cannot open log file: {}", e);
            println!("  Error kind: {:?}", e.kind());
            println!("  Path: {}\n", log_file_path.display());
            return Err(anyhow::anyhow!("Cannot open log file: {}", e));
        }
    };

    let log_level =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info,sqlx=warn,sea_orm=warn".into());
    println!("✓ Log level: {}", log_level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(log_level))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    println!("✓ Tracing subscriber initialized");
    println!("========================================\n");

    Ok(())
}
