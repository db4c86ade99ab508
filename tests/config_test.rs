use anyhow::Result;
use rust_ohmbench::config::{Config, VisualizationConfig};
use tempfile::tempdir;

#[test]
fn test_config_load_and_save() -> Result<()> {
    // Create a temporary directory
    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("config.yaml");

    // Create a custom config
    let config = Config {
        visualization: VisualizationConfig {
            port: 8081,
            address: "192.168.1.1".to_string(),
            name: "TestServer".to_string(),
            enabled: true,
        },
        ..Config::default()
    };

    // Save config to file
    config.save_to_file(&config_path)?;

    // Load config from file
    let loaded_config = Config::from_file(&config_path)?;

    // Verify loaded config matches original
    assert_eq!(loaded_config.visualization.port, 8081);
    assert_eq!(loaded_config.visualization.address, "192.168.1.1");
    assert_eq!(loaded_config.visualization.name, "TestServer");

    // Test loading default config for non-existent file
    let non_existent_path = temp_dir.path().join("non_existent.yaml");
    let default_config = Config::from_file(&non_existent_path)?;

    // Verify default config was created
    assert!(non_existent_path.exists());
    assert_eq!(default_config.visualization.port, 8080);
    assert_eq!(default_config.visualization.address, "127.0.0.1");
    assert!(default_config.chart.enabled);
    assert_eq!(default_config.chart.quickchart_url, "https://quickchart.io");

    Ok(())
}

#[test]
fn test_partial_config_falls_back_to_defaults() -> Result<()> {
    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("partial.yaml");

    // Only the port is specified; everything else must come from defaults
    std::fs::write(&config_path, "visualization:\n  port: 9001\n")?;

    let config = Config::from_file(&config_path)?;
    assert_eq!(config.visualization.port, 9001);
    assert_eq!(config.visualization.address, "127.0.0.1");
    assert_eq!(config.chart.width, 500);
    assert_eq!(config.chart.height, 300);

    Ok(())
}

#[test]
fn test_apply_args_overrides() {
    let mut config = Config::default();
    assert_eq!(config.visualization.port, 8080);
    assert_eq!(config.visualization.address, "127.0.0.1");

    // Apply command-line arguments
    config.apply_args(Some(9000), Some("192.168.0.1".to_string()), true);

    // Verify values were overridden
    assert_eq!(config.visualization.port, 9000);
    assert_eq!(config.visualization.address, "192.168.0.1");
    assert!(config.visualization.enabled);

    // None leaves the configured values alone
    config.apply_args(None, None, true);
    assert_eq!(config.visualization.port, 9000);
    assert_eq!(config.visualization.address, "192.168.0.1");
}

#[test]
fn test_invalid_config_creates_sample_file() -> Result<()> {
    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("broken.yaml");

    // Not valid YAML for the Config structure
    std::fs::write(&config_path, "visualization:\n  port: \"not a number\"\n")?;

    let result = Config::from_file(&config_path);
    assert!(result.is_err());

    // A sample file with default values is written next to the broken one
    let sample_path = temp_dir.path().join("broken.sample.yaml");
    assert!(sample_path.exists());

    Ok(())
}

#[test]
fn test_bad_renderer_url_is_rejected() -> Result<()> {
    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("badurl.yaml");

    std::fs::write(
        &config_path,
        "chart:\n  enabled: true\n  quickchart_url: \"ftp://quickchart.io\"\n",
    )?;

    assert!(Config::from_file(&config_path).is_err());
    Ok(())
}
