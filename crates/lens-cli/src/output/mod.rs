use std::fmt::Write as _;

use lens_chart::{ChartView, HeatmapView};
use lens_core::Record;
use lens_view::Page;
use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Weekday column captions for heatmap tables, Monday first.
const WEEKDAY_CAPTIONS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// A table page renders its rows followed by a paging footer.
pub fn render_page(page: &Page<Record>, format: OutputFormat) -> anyhow::Result<String> {
    if format != OutputFormat::Table {
        return render(page, format);
    }
    let items = page
        .items
        .iter()
        .map(|record| Value::Object(record.as_map().clone()))
        .collect::<Vec<_>>();
    let body = render_array_table(&items);
    Ok(format!(
        "{body}\n\npage {} of {} ({} rows)",
        page.current_page, page.total_pages, page.total_items
    ))
}

/// Labels down the side, one column per dataset.
pub fn render_chart(chart: &ChartView, format: OutputFormat) -> anyhow::Result<String> {
    if format != OutputFormat::Table {
        return render(chart, format);
    }
    if !chart.has_data {
        return Ok(String::from("(no data)"));
    }

    let mut headers = vec!["label"];
    headers.extend(chart.datasets.iter().map(|d| d.label.as_str()));
    let rows = chart
        .labels
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let mut row = vec![label.clone()];
            row.extend(
                chart
                    .datasets
                    .iter()
                    .map(|d| d.data.get(index).map_or_else(|| "-".to_string(), f64::to_string)),
            );
            row
        })
        .collect::<Vec<_>>();
    Ok(table::render_rows(&headers, &rows, table_options()))
}

/// Months down the side, weekdays across.
pub fn render_heatmap(heatmap: &HeatmapView, format: OutputFormat) -> anyhow::Result<String> {
    if format != OutputFormat::Table {
        return render(heatmap, format);
    }
    if !heatmap.has_data {
        return Ok(String::from("(no data)"));
    }

    let mut headers = vec!["month"];
    headers.extend(WEEKDAY_CAPTIONS);
    let rows = heatmap
        .months
        .iter()
        .zip(&heatmap.values)
        .map(|(month, values)| {
            let mut row = vec![month.to_string()];
            row.extend(values.iter().map(f64::to_string));
            row
        })
        .collect::<Vec<_>>();

    let mut out = table::render_rows(&headers, &rows, table_options());
    write!(out, "\n\nmin {} max {}", heatmap.min, heatmap.max)?;
    if heatmap.unrecognized_weekdays > 0 || heatmap.dropped_points > 0 {
        write!(
            out,
            " ({} unrecognized weekdays, {} dropped points)",
            heatmap.unrecognized_weekdays, heatmap.dropped_points
        )?;
    }
    Ok(out)
}

pub fn print(rendered: &str) {
    println!("{rendered}");
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    match value {
        Value::Array(items) => Ok(render_array_table(&items)),
        Value::Object(map) => {
            let headers = ["key", "value"];
            let rows = map
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            Ok(table::render_rows(&headers, &rows, table_options()))
        }
        scalar => Ok(table::render_rows(
            &["value"],
            &[vec![value_to_cell(&scalar)]],
            table_options(),
        )),
    }
}

fn render_array_table(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_rows(&["value"], &rows, table_options());
    }

    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    if headers.is_empty() {
        return String::from("(no columns)");
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_rows(&header_refs, &rows, table_options())
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}
