//! One generation run: load the configuration, build the generator, write.

use std::path::Path;
use std::time::Instant;

use contact_core::{Configuration, RecordSource};
use contact_generator::ContactGenerator;
use contact_sink::SinkDescriptor;
use tracing::info;

use crate::factory::create_writer_for;
use crate::SynthError;

/// Run a full generation from the configuration file at `config_path`.
///
/// The configuration is validated completely before any record is generated
/// or any sink is opened.
pub async fn run(config_path: &Path) -> Result<SinkDescriptor, SynthError> {
    let config = Configuration::from_file(config_path)?;
    run_with(&config).await
}

/// Run a full generation from an already validated configuration.
pub async fn run_with(config: &Configuration) -> Result<SinkDescriptor, SynthError> {
    let start_time = Instant::now();
    info!(
        "Generating {} contacts into {} (seed={:?})",
        config.record_count, config.backend, config.seed
    );

    let probabilities = config.field_probabilities.clone();
    let generator: Box<dyn RecordSource + Send> = match config.seed {
        Some(seed) => Box::new(ContactGenerator::seeded(probabilities, seed)),
        None => Box::new(ContactGenerator::from_entropy(probabilities)),
    };

    let mut writer = create_writer_for(
        config.backend,
        config.record_count,
        config.connection.as_ref(),
        &config.output_dir,
        generator,
    )?;
    let descriptor = writer.write().await?;

    info!("Run finished in {:?}", start_time.elapsed());
    Ok(descriptor)
}
