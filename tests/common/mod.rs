use std::fs::File;
use std::io::Error;
use std::path::Path;

/// Writes an event stream of `orders` exact-payment Latte purchases.
pub fn generate_events_csv(path: &Path, orders: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["type", "product", "cents"])?;

    for _ in 0..orders {
        wtr.write_record(["order", "Latte", ""])?;
        wtr.write_record(["coin", "", "50"])?;
    }

    wtr.flush()?;
    Ok(())
}
