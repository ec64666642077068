//! Web server command.

use console::style;

use crate::config::Settings;

/// Port used when the bind address names only a host.
const DEFAULT_PORT: u16 = 3040;

/// Start the web server.
pub async fn cmd_serve(settings: &Settings, bind: &str) -> anyhow::Result<()> {
    let (host, port) = parse_bind_address(bind);

    if settings.database_url.is_none() {
        settings.ensure_directories()?;
    }

    let ctx = settings.create_db_context()?;
    if let Err(e) = ctx.test_connection().await {
        eprintln!("  {} Cannot open database: {}", style("✗").red(), e);
        return Err(anyhow::anyhow!("Database connection failed: {}", e));
    }

    // Run database migrations first
    println!("{} Running database migrations...", style("→").cyan());
    match ctx.init_schema().await {
        Ok(_) => println!("  {} Database ready", style("✓").green()),
        Err(e) => {
            eprintln!("  {} Migration failed: {}", style("✗").red(), e);
            return Err(anyhow::anyhow!("Database migration failed: {}", e));
        }
    }

    println!(
        "{} Starting dbrsettings console at http://{}:{}",
        style("→").cyan(),
        host,
        port
    );
    println!("  Press Ctrl+C to stop");

    crate::server::serve(settings, &host, port).await
}

/// Parse a bind address that can be:
/// - Just a port: "3040" -> 127.0.0.1:3040
/// - Just a host: "0.0.0.0" -> 0.0.0.0:3040
/// - Host and port: "0.0.0.0:3040" -> 0.0.0.0:3040
fn parse_bind_address(bind: &str) -> (String, u16) {
    if let Ok(port) = bind.parse::<u16>() {
        return ("127.0.0.1".to_string(), port);
    }

    if let Some((host, port_str)) = bind.rsplit_once(':') {
        if let Ok(port) = port_str.parse::<u16>() {
            return (host.to_string(), port);
        }
    }

    (bind.to_string(), DEFAULT_PORT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bind_address() {
        assert_eq!(parse_bind_address("8080"), ("127.0.0.1".to_string(), 8080));
        assert_eq!(parse_bind_address("0.0.0.0"), ("0.0.0.0".to_string(), 3040));
        assert_eq!(
            parse_bind_address("192.168.1.5:9000"),
            ("192.168.1.5".to_string(), 9000)
        );
        assert_eq!(parse_bind_address("localhost"), ("localhost".to_string(), 3040));
    }
}
