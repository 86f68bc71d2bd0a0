//! Print the OpenAPI document for the record endpoints as JSON.

use assim_backend::ApiDoc;
use color_eyre::eyre::{Context, Result};
use utoipa::OpenApi;

#[expect(clippy::print_stdout, reason = "the document is the program output")]
fn main() -> Result<()> {
    color_eyre::install()?;
    let document = ApiDoc::openapi()
        .to_pretty_json()
        .wrap_err("failed to serialise OpenAPI document")?;
    println!("{document}");
    Ok(())
}
