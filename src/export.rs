use super::render::RenderError;

use convergence::{observed_orders, Quantity, ReferenceCurves};
use dumps::ConvergenceTable;
use json::{object, JsonValue};
use nalgebra::DVector;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

fn series(values: &DVector<f64>) -> JsonValue {
    JsonValue::from(values.iter().copied().collect::<Vec<f64>>())
}

fn orders(values: Vec<Option<f64>>) -> JsonValue {
    JsonValue::from(
        values
            .into_iter()
            .map(|order| match order {
                Some(order) => JsonValue::from(order),
                None => JsonValue::Null,
            })
            .collect::<Vec<_>>(),
    )
}

/// Produce a Json Object describing an error report along with the reference curves of each quantity
pub fn report_to_json(table: &ConvergenceTable, quantities: &[(&Quantity, ReferenceCurves)]) -> JsonValue {
    let nominal = table.nominal_orders();

    let mut report = object! {
        "dofs": JsonValue::from(table.dofs().to_vec()),
        "h": series(table.h()),
        "tau": series(table.tau()),
        "p": nominal.p,
        "q": nominal.q,
        "quantities": object! {},
    };

    for (quantity, curves) in quantities.iter() {
        let errors = match table.error(quantity.norm) {
            Some(errors) => errors,
            None => continue,
        };

        report["quantities"][quantity.name] = object! {
            "errors": series(errors),
            "space": series(&curves.space),
            "time": series(&curves.time),
            "combined": match &curves.combined {
                Some(combined) => series(combined),
                None => JsonValue::Null,
            },
            "observed_space_orders": orders(observed_orders(errors, table.h())),
            "observed_time_orders": orders(observed_orders(errors, table.tau())),
        };
    }

    report
}

/// Print a report to the JSON file specified by path, creating its directory if needed
pub fn export_to_json(path: impl AsRef<Path>, report: &JsonValue) -> Result<(), RenderError> {
    let path = path.as_ref();

    let write = || -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let f = File::create(path)?;
        let mut w = BufWriter::new(&f);
        report.write_pretty(&mut w, 4)?;
        w.flush()
    };

    write().map_err(|source| RenderError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %path.display(), "report exported");
    Ok(())
}
