//! CSV export endpoint

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use csv::WriterBuilder;
use engine::{EngineError, ExportModule, ExportSheet};

use crate::{
    ServerError,
    extract::{ApiPath, ApiQuery, ReadParams, today},
    server::ServerState,
};

/// Render `sheet` as CSV: a title line, the header row, the records, a blank
/// line, then one `label,value` line per summary figure.
fn to_csv(sheet: &ExportSheet) -> Result<Vec<u8>, csv::Error> {
    let mut writer = WriterBuilder::new().flexible(true).from_writer(vec![]);
    writer.write_record([sheet.title.as_str(), sheet.currency.code()])?;
    writer.write_record(&sheet.headers)?;
    for row in &sheet.rows {
        writer.write_record(row)?;
    }
    writer.write_record([""])?;
    for figure in &sheet.summary {
        writer.write_record([figure.label.as_str(), figure.value.as_str()])?;
    }
    writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))
}

pub async fn get(
    State(state): State<ServerState>,
    ApiPath(module): ApiPath<String>,
    ApiQuery(params): ApiQuery<ReadParams>,
) -> Result<Response, ServerError> {
    let module = ExportModule::try_from(module.as_str())
        .map_err(|_| EngineError::KeyNotFound(format!("export module {module}")))?;
    let target = params.target(&state.engine).await?;
    let today = today();
    let sheet = state.engine.export(module, target, today).await?;

    let body = to_csv(&sheet).map_err(|err| {
        tracing::error!("failed to render export: {err}");
        ServerError::Internal("export failed".to_string())
    })?;
    let disposition = format!(
        "attachment; filename=\"{}.csv\"",
        sheet.file_stem(module, today)
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
