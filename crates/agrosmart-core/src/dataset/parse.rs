use super::CropTable;
use crate::error::AgroError;
use crate::model::{
    EnvironmentalReading, DEFAULT_FERTILIZER_NAME, DEFAULT_HUMIDITY, DEFAULT_MOISTURE,
    DEFAULT_NITROGEN, DEFAULT_PHOSPHOROUS, DEFAULT_POTASSIUM, DEFAULT_SOIL_TYPE,
    DEFAULT_TEMPERATURE,
};
use csv::{ReaderBuilder, StringRecord, Trim};

/// Column positions resolved from the header row.
#[derive(Debug)]
struct Columns {
    crop_type: usize,
    temperature: Option<usize>,
    humidity: Option<usize>,
    moisture: Option<usize>,
    soil_type: Option<usize>,
    nitrogen: Option<usize>,
    potassium: Option<usize>,
    phosphorous: Option<usize>,
    fertilizer_name: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Columns, AgroError> {
        let names: Vec<String> = headers.iter().map(|h| clean(h).to_lowercase()).collect();

        let crop_type = find_column(&names, &["crop type", "crop"]).ok_or_else(|| {
            AgroError::DatasetParse(format!(
                "missing 'Crop Type' column in header: {}",
                names.join(", ")
            ))
        })?;

        Ok(Columns {
            crop_type,
            // The published dataset spells it "Temparature"
            temperature: find_column(&names, &["temparature", "temperature"]),
            humidity: find_column(&names, &["humidity"]),
            moisture: find_column(&names, &["moisture"]),
            soil_type: find_column(&names, &["soil type"]),
            nitrogen: find_column(&names, &["nitrogen"]),
            potassium: find_column(&names, &["potassium"]),
            phosphorous: find_column(&names, &["phosphorous", "phosphorus"]),
            fertilizer_name: find_column(&names, &["fertilizer name"]),
        })
    }
}

fn find_column(names: &[String], aliases: &[&str]) -> Option<usize> {
    names.iter().position(|n| aliases.contains(&n.as_str()))
}

/// Parse the crop reference CSV into a table keyed by lowercased crop type.
///
/// Fields are split on commas (quoted commas are not supported), trimmed
/// and stripped of double quotes. Blank lines and rows without a crop type
/// are skipped. Missing or non-numeric values fall back to per-field
/// defaults. A later row for the same crop replaces an earlier one.
pub fn parse_crop_table(text: &str) -> Result<CropTable, AgroError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .quoting(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| AgroError::DatasetParse(e.to_string()))?
        .clone();
    let columns = Columns::from_headers(&headers)?;

    let mut table = CropTable::new();
    for (line, record) in reader.records().enumerate() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Skipping unreadable dataset row {}: {e}", line + 2);
                continue;
            }
        };

        let crop_key = match field(&record, Some(columns.crop_type)) {
            Some(crop) => crop.to_lowercase(),
            None => continue,
        };

        let reading = parse_reading(&record, &columns);
        if table.insert(crop_key.clone(), reading).is_some() {
            log::debug!("Dataset row {} replaces earlier reading for '{crop_key}'", line + 2);
        }
    }

    Ok(table)
}

fn parse_reading(record: &StringRecord, columns: &Columns) -> EnvironmentalReading {
    EnvironmentalReading {
        temperature: numeric(record, columns.temperature, DEFAULT_TEMPERATURE),
        humidity: numeric(record, columns.humidity, DEFAULT_HUMIDITY),
        moisture: numeric(record, columns.moisture, DEFAULT_MOISTURE),
        soil_type: field(record, columns.soil_type)
            .map(|s| s.to_lowercase())
            .unwrap_or_else(|| DEFAULT_SOIL_TYPE.to_string()),
        nitrogen: numeric(record, columns.nitrogen, DEFAULT_NITROGEN),
        potassium: numeric(record, columns.potassium, DEFAULT_POTASSIUM),
        phosphorous: numeric(record, columns.phosphorous, DEFAULT_PHOSPHOROUS),
        fertilizer_name: field(record, columns.fertilizer_name)
            .unwrap_or_else(|| DEFAULT_FERTILIZER_NAME.to_string()),
    }
}

/// Cleaned, non-empty field value at `idx`.
fn field(record: &StringRecord, idx: Option<usize>) -> Option<String> {
    let value = clean(record.get(idx?)?);
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn numeric(record: &StringRecord, idx: Option<usize>, default: f64) -> f64 {
    field(record, idx)
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

fn clean(s: &str) -> String {
    s.trim().replace('"', "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Crop Type,Temparature,Humidity,Moisture,Soil Type,Nitrogen,Potassium,Phosphorous,Fertilizer Name";

    fn csv(rows: &[&str]) -> String {
        let mut text = HEADER.to_string();
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text
    }

    #[test]
    fn test_parse_basic_row() {
        let table = parse_crop_table(&csv(&["Rice,30,40,20,Clay,80,20,30,Urea"])).unwrap();
        let rice = &table["rice"];
        assert_eq!(rice.temperature, 30.0);
        assert_eq!(rice.humidity, 40.0);
        assert_eq!(rice.moisture, 20.0);
        assert_eq!(rice.soil_type, "clay");
        assert_eq!(rice.nitrogen, 80.0);
        assert_eq!(rice.potassium, 20.0);
        assert_eq!(rice.phosphorous, 30.0);
        assert_eq!(rice.fertilizer_name, "Urea");
    }

    #[test]
    fn test_quotes_and_whitespace_stripped() {
        let text = "\"Crop Type\", \"Temparature\" ,Humidity\n \"Maize\" , \"26\" ,52";
        let table = parse_crop_table(text).unwrap();
        let maize = &table["maize"];
        assert_eq!(maize.temperature, 26.0);
        assert_eq!(maize.humidity, 52.0);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let table = parse_crop_table(&csv(&[
            "",
            "Rice,30,40,20,Clay,80,20,30,Urea",
            "   ",
            "Wheat,22,55,45,Loamy,60,25,30,DAP",
            "",
        ]))
        .unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_missing_values_use_defaults() {
        let table = parse_crop_table(&csv(&["Cotton,,,,,,,,"])).unwrap();
        assert_eq!(table["cotton"], EnvironmentalReading::default());
    }

    #[test]
    fn test_non_numeric_values_use_defaults() {
        let table = parse_crop_table(&csv(&["Cotton,hot,n/a,NaN,Sandy,lots,inf,-,Urea"])).unwrap();
        let cotton = &table["cotton"];
        assert_eq!(cotton.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(cotton.humidity, DEFAULT_HUMIDITY);
        assert_eq!(cotton.moisture, DEFAULT_MOISTURE);
        assert_eq!(cotton.nitrogen, DEFAULT_NITROGEN);
        assert_eq!(cotton.potassium, DEFAULT_POTASSIUM);
        assert_eq!(cotton.phosphorous, DEFAULT_PHOSPHOROUS);
        assert_eq!(cotton.soil_type, "sandy");
    }

    #[test]
    fn test_short_row_uses_defaults() {
        let table = parse_crop_table(&csv(&["Barley,18"])).unwrap();
        let barley = &table["barley"];
        assert_eq!(barley.temperature, 18.0);
        assert_eq!(barley.fertilizer_name, DEFAULT_FERTILIZER_NAME);
        assert_eq!(barley.soil_type, DEFAULT_SOIL_TYPE);
    }

    #[test]
    fn test_missing_columns_use_defaults() {
        let table = parse_crop_table("Crop Type,Temperature\nPeas,15").unwrap();
        let peas = &table["peas"];
        assert_eq!(peas.temperature, 15.0);
        assert_eq!(peas.fertilizer_name, "28-28");
        assert_eq!(peas.humidity, DEFAULT_HUMIDITY);
    }

    #[test]
    fn test_later_row_replaces_earlier() {
        let table = parse_crop_table(&csv(&[
            "Rice,30,40,20,Clay,80,20,30,Urea",
            "rice,25,60,35,Loamy,100,35,45,DAP",
        ]))
        .unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table["rice"].temperature, 25.0);
    }

    #[test]
    fn test_rows_without_crop_skipped() {
        let table = parse_crop_table(&csv(&[",30,40,20,Clay,80,20,30,Urea"])).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_missing_crop_column_rejected() {
        assert!(parse_crop_table("Temperature,Humidity\n30,40").is_err());
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(parse_crop_table("").is_err());
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = format!("{HEADER}\r\nRice,30,40,20,Clay,80,20,30,Urea\r\n");
        let table = parse_crop_table(&text).unwrap();
        assert_eq!(table["rice"].fertilizer_name, "Urea");
    }
}
