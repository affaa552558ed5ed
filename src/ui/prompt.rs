use crate::error::Result;
use crate::models::{non_blank, Crop, District, PredictionForm, Season};
use dialoguer::{Input, Select};

/// Walk the user through the form, pre-filled with `form`'s values.
pub fn prompt_form(form: PredictionForm) -> Result<PredictionForm> {
    let mut form = form;

    println!("Location & crop");
    form.district = Some(select(
        "  District",
        &District::ALL,
        form.district,
        District::as_str,
    )?);
    form.crop = Some(select("  Crop", &Crop::ALL, form.crop, Crop::as_str)?);
    form.season = Some(select("  Season", &Season::ALL, form.season, Season::as_str)?);

    println!();
    println!("Soil & weather");
    form.soil_ph = reading("  Soil pH", form.soil_ph)?;
    form.soil_n = reading("  Soil N (kg/ha)", form.soil_n)?;
    form.soil_p = reading("  Soil P (kg/ha)", form.soil_p)?;
    form.soil_k = reading("  Soil K (kg/ha)", form.soil_k)?;
    form.rainfall_30d = reading("  Rainfall 30d (mm)", form.rainfall_30d)?;
    form.temp_mean_30d = reading("  Temp mean 30d (°C)", form.temp_mean_30d)?;
    form.previous_yield = reading("  Previous yield (q/ha, blank to skip)", form.previous_yield)?;

    println!();
    println!("Inputs & observations");
    form.fertilizer_used = text("  Fertilizer used", form.fertilizer_used)?;
    form.fertilizer_amount_kg_per_ha =
        reading("  Amount (kg/ha)", form.fertilizer_amount_kg_per_ha)?;
    form.recent_pest_issue = text("  Recent pest/disease (optional)", form.recent_pest_issue)?;
    println!();

    Ok(form)
}

fn select<T: Copy + PartialEq>(
    prompt: &str,
    options: &[T],
    current: Option<T>,
    label: fn(&T) -> &'static str,
) -> Result<T> {
    let labels: Vec<&str> = options.iter().map(label).collect();
    let default = current
        .and_then(|c| options.iter().position(|o| *o == c))
        .unwrap_or(0);

    let index = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(default)
        .interact()?;

    Ok(options[index])
}

/// Blank or unparseable input leaves the reading missing.
fn reading(prompt: &str, current: Option<f64>) -> Result<Option<f64>> {
    let raw: String = Input::new()
        .with_prompt(prompt)
        .default(current.map(|v| v.to_string()).unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    match raw.parse::<f64>() {
        Ok(v) => Ok(Some(v)),
        Err(_) => {
            tracing::warn!("Ignoring non-numeric input '{}' for {}", raw, prompt.trim());
            Ok(None)
        }
    }
}

fn text(prompt: &str, current: Option<String>) -> Result<Option<String>> {
    let raw: String = Input::new()
        .with_prompt(prompt)
        .default(current.unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    Ok(non_blank(Some(raw.as_str())))
}

