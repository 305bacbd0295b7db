/// Загрузка выборки TEDL с настройками по умолчанию

use anyhow::Context;
use tracing_subscriber;

use tedl_data::{Sample, SampleConfig};

fn main() -> anyhow::Result<()> {
    // Инициализация логирования
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = SampleConfig {
        y_attributes: Some("kappatotal".into()),
        ..SampleConfig::default()
    };

    let sample = Sample::load(&config).context("Failed to build sample")?;
    let (train_x, test_x, train_y, test_y, test_formula) = sample.data();

    tracing::info!(
        "Features: {:?}",
        sample.x_attributes().iter().map(|a| a.name()).collect::<Vec<_>>()
    );
    tracing::info!(
        "Train: {}x{} -> {}x{}, test: {}x{} -> {}x{}",
        train_x.nrows(),
        train_x.ncols(),
        train_y.nrows(),
        train_y.ncols(),
        test_x.nrows(),
        test_x.ncols(),
        test_y.nrows(),
        test_y.ncols()
    );
    tracing::info!("Test formulas: {}", test_formula.join(", "));

    Ok(())
}
