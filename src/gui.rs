//! Desktop Form (feature `gui`)
//!
//! eframe/egui shell over the prediction helper: city preset dropdown with
//! region/typical-range readout, numeric entries for the two time fields,
//! vocabulary dropdowns for the categorical features, and a predict button
//! that shows the label, the vote fractions, and a serving suggestion.
//!
//! Failure surfaces as modal dialogs: a missing model tells the user to
//! run training first, malformed numeric input shows the parse error.
//! Form-to-sample construction and result formatting are plain functions
//! so they test without a display.

use crate::climate::{all_cities, region_for_city};
use crate::prediction::{load_model, predict_sample, probability_map, Prediction};
use crate::record::FoodSample;
use crate::training::{FreshnessModel, DEFAULT_MODEL_PATH};
use crate::vocab::{
    FreshnessLevel, CONTAINER_TYPES, COOKING_METHODS, FOOD_TYPES, MOISTURE_TYPES,
    SMELL_DESCRIPTORS, STORAGE_CONDITIONS, TEXTURE_DESCRIPTORS,
};
use eframe::egui;
use std::path::Path;

/// Raw widget state. Numeric fields stay strings until Predict parses
/// them, matching the form's free-text entries.
#[derive(Debug, Clone)]
pub struct SampleForm {
    pub city: String,
    pub storage_time: String,
    pub time_since_cooking: String,
    pub food_type: String,
    pub smell: String,
    pub storage_condition: String,
    pub moisture_type: String,
    pub cooking_method: String,
    pub container_type: String,
}

impl Default for SampleForm {
    fn default() -> Self {
        Self {
            city: all_cities()[0].to_string(),
            storage_time: "2.0".to_string(),
            time_since_cooking: "1.0".to_string(),
            food_type: FOOD_TYPES[0].to_string(),
            smell: SMELL_DESCRIPTORS[0].to_string(),
            storage_condition: STORAGE_CONDITIONS[0].to_string(),
            moisture_type: MOISTURE_TYPES[0].to_string(),
            cooking_method: COOKING_METHODS[0].to_string(),
            container_type: CONTAINER_TYPES[0].to_string(),
        }
    }
}

/// Build a record from widget state. The error string is shown verbatim
/// in the input dialog.
///
/// Texture is not a form field (it is not a model feature); the record
/// carries the first vocabulary entry as a placeholder the encoder
/// ignores.
pub fn build_sample(form: &SampleForm) -> Result<FoodSample, String> {
    let storage_time = form
        .storage_time
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("storage_time '{}': {}", form.storage_time.trim(), e))?;
    let time_since_cooking = form
        .time_since_cooking
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("time_since_cooking '{}': {}", form.time_since_cooking.trim(), e))?;

    let region = region_for_city(&form.city)
        .map(|r| r.name.to_string())
        .unwrap_or_default();

    Ok(FoodSample {
        city: form.city.clone(),
        region,
        storage_time,
        time_since_cooking,
        storage_condition: form.storage_condition.clone(),
        container_type: form.container_type.clone(),
        food_type: form.food_type.clone(),
        moisture_type: form.moisture_type.clone(),
        cooking_method: form.cooking_method.clone(),
        texture: TEXTURE_DESCRIPTORS[0].to_string(),
        smell: form.smell.clone(),
        freshness_level: FreshnessLevel::Fresh,
    })
}

/// Result text under the predict button.
pub fn format_result(model: &FreshnessModel, prediction: &Prediction) -> String {
    let probabilities: Vec<String> = probability_map(model, prediction)
        .into_iter()
        .map(|(label, p)| format!("{}: {:.3}", label, p))
        .collect();

    format!(
        "Predicted: {}  Probabilities: {{{}}}\nFinal suggestion: {}",
        prediction.level,
        probabilities.join(", "),
        prediction.level.suggestion()
    )
}

/// Region + typical ranges readout for the selected city preset.
pub fn city_climate_text(city: &str) -> (String, String) {
    match region_for_city(city) {
        Some(region) => (
            region.name.to_string(),
            format!(
                "Temp: {:.0}-{:.0} °C   Humidity: {:.0}-{:.0} %",
                region.temp_range.0,
                region.temp_range.1,
                region.humidity_range.0,
                region.humidity_range.1
            ),
        ),
        None => (String::new(), String::new()),
    }
}

pub struct FreshnessApp {
    model: Option<FreshnessModel>,
    form: SampleForm,
    result: String,
    dialog: Option<(String, String)>,
}

impl FreshnessApp {
    /// Load the model eagerly; a missing artifact leaves the form usable
    /// and surfaces as a dialog on the first Predict.
    pub fn new(model_path: &Path) -> Self {
        let model = match load_model(model_path) {
            Ok(model) => Some(model),
            Err(e) => {
                log::warn!("model unavailable at startup: {}", e);
                None
            }
        };

        Self {
            model,
            form: SampleForm::default(),
            result: String::new(),
            dialog: None,
        }
    }

    fn on_predict(&mut self) {
        let Some(model) = &self.model else {
            self.dialog = Some((
                "Model missing".to_string(),
                "Model not trained or not found. Run the train_model binary first.".to_string(),
            ));
            return;
        };

        match build_sample(&self.form) {
            Ok(sample) => {
                let prediction = predict_sample(model, &sample);
                self.result = format_result(model, &prediction);
            }
            Err(message) => {
                self.dialog = Some(("Prediction error".to_string(), message));
            }
        }
    }

    fn combo_row(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut String,
        options: &[&str],
    ) {
        ui.label(label);
        egui::ComboBox::from_id_source(label.to_string())
            .selected_text(value.clone())
            .width(180.0)
            .show_ui(ui, |ui| {
                for option in options {
                    ui.selectable_value(value, option.to_string(), *option);
                }
            });
        ui.end_row();
    }
}

impl eframe::App for FreshnessApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Cooked Food Freshness Predictor");
            ui.add_space(8.0);

            let (region, ranges) = city_climate_text(&self.form.city);

            egui::Grid::new("sample_form")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    ui.label("City (preset)");
                    egui::ComboBox::from_id_source("city")
                        .selected_text(self.form.city.clone())
                        .width(180.0)
                        .show_ui(ui, |ui| {
                            for city in all_cities() {
                                ui.selectable_value(&mut self.form.city, city.to_string(), city);
                            }
                        });
                    ui.end_row();

                    ui.label("Region");
                    ui.label(region);
                    ui.end_row();

                    ui.label("Typical ranges");
                    ui.label(ranges);
                    ui.end_row();

                    ui.label("storage_time (hrs)");
                    ui.add(egui::TextEdit::singleline(&mut self.form.storage_time).desired_width(180.0));
                    ui.end_row();

                    ui.label("time_since_cooking (hrs)");
                    ui.add(
                        egui::TextEdit::singleline(&mut self.form.time_since_cooking)
                            .desired_width(180.0),
                    );
                    ui.end_row();

                    Self::combo_row(ui, "food_type", &mut self.form.food_type, FOOD_TYPES);
                    Self::combo_row(ui, "smell", &mut self.form.smell, SMELL_DESCRIPTORS);
                    Self::combo_row(
                        ui,
                        "storage_condition",
                        &mut self.form.storage_condition,
                        STORAGE_CONDITIONS,
                    );
                    Self::combo_row(
                        ui,
                        "moisture_type",
                        &mut self.form.moisture_type,
                        MOISTURE_TYPES,
                    );
                    Self::combo_row(
                        ui,
                        "cooking_method",
                        &mut self.form.cooking_method,
                        COOKING_METHODS,
                    );
                    Self::combo_row(
                        ui,
                        "container_type",
                        &mut self.form.container_type,
                        CONTAINER_TYPES,
                    );
                });

            ui.add_space(12.0);
            if ui.button("Predict Freshness").clicked() {
                self.on_predict();
            }

            ui.add_space(8.0);
            if self.model.is_none() && self.result.is_empty() {
                ui.label("Model not loaded");
            } else {
                ui.label(egui::RichText::new(self.result.clone()).strong());
            }
        });

        if let Some((title, message)) = self.dialog.clone() {
            egui::Window::new(title)
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(message);
                    if ui.button("OK").clicked() {
                        self.dialog = None;
                    }
                });
        }
    }
}

/// Launch the form against the default artifact path.
pub fn run() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([700.0, 560.0])
            .with_resizable(false),
        ..Default::default()
    };

    eframe::run_native(
        "Cooked Food Freshness Predictor",
        options,
        Box::new(|_cc| Box::new(FreshnessApp::new(Path::new(DEFAULT_MODEL_PATH)))),
    )
}
