//! Cache management commands

use crate::cache::CacheStorage;
use crate::cli::OutputFormat;
use crate::error::Result;

/// Show cache status/statistics
pub fn status(format: OutputFormat) -> Result<()> {
    let cache = CacheStorage::open()?;
    let stats = cache.stats()?;
    let path = CacheStorage::cache_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    match format {
        OutputFormat::Json => {
            let endpoints: serde_json::Map<String, serde_json::Value> = stats
                .endpoints
                .iter()
                .map(|(endpoint, count)| (endpoint.clone(), (*count).into()))
                .collect();
            let json = serde_json::json!({
                "total_entries": stats.total_entries,
                "valid_entries": stats.valid_entries,
                "expired_entries": stats.expired_entries,
                "total_size_bytes": stats.total_size_bytes,
                "total_size_human": format_size(stats.total_size_bytes),
                "oldest_entry_timestamp": stats.oldest_entry,
                "newest_entry_timestamp": stats.newest_entry,
                "endpoints": endpoints,
                "path": path,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ => {
            println!("Cache Status");
            println!("────────────────────────────────────────");
            println!("Location:       {}", path);
            println!("Valid entries:  {}", stats.valid_entries);
            println!("Expired:        {}", stats.expired_entries);
            println!("Total size:     {}", format_size(stats.total_size_bytes));

            if let Some(oldest) = stats.oldest_entry {
                println!("Oldest entry:   {}", format_timestamp(oldest));
            }
            if let Some(newest) = stats.newest_entry {
                println!("Newest entry:   {}", format_timestamp(newest));
            }

            if !stats.endpoints.is_empty() {
                println!();
                println!("By endpoint");
                for (endpoint, count) in &stats.endpoints {
                    println!("  {:<36} {}", endpoint, count);
                }
            }
        }
    }

    Ok(())
}

/// Clear every cache entry, or only those of endpoints starting with `endpoint`
pub fn clear(format: OutputFormat, endpoint: Option<&str>) -> Result<()> {
    let cache = CacheStorage::open()?;
    let stats = match endpoint {
        Some(prefix) => cache.delete_by_endpoint(prefix)?,
        None => cache.clear_all()?,
    };

    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "entries_removed": stats.entries_removed,
                "endpoint": endpoint,
                "success": true,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ => match (stats.entries_removed, endpoint) {
            (0, Some(prefix)) => println!("No cache entries for '{}'", prefix),
            (0, None) => println!("Cache was already empty"),
            (n, Some(prefix)) => println!("Cleared {} cache entries for '{}'", n, prefix),
            (n, None) => println!("Cleared {} cache entries", n),
        },
    }

    Ok(())
}

/// Show cache path
pub fn path() -> Result<()> {
    let path = CacheStorage::cache_dir()?;
    println!("{}", path.display());
    Ok(())
}

fn format_timestamp(timestamp: i64) -> String {
    chrono::DateTime::from_timestamp(timestamp, 0)
        .map(|d| {
            d.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| "unknown".to_string())
}

/// Format bytes as human-readable size
fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;
    const GB: usize = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
