use eframe::egui::{Color32, Ui};
use egui_plot::{Line, LineStyle, Plot};

use modulus_panda::color::generate_palette;

use crate::state::AppState;

fn to_points(xs: &[f64], ys: &[f64]) -> Vec<[f64; 2]> {
    xs.iter().zip(ys).map(|(&x, &y)| [x, y]).collect()
}

fn fit_label(name: &str, modulus: f64, r_squared: Option<f64>) -> String {
    match r_squared {
        Some(r2) => format!("{name} fit ({modulus:.2} MPa, R²={r2:.2})"),
        None => format!("{name} fit ({modulus:.2} MPa)"),
    }
}

// ---------------------------------------------------------------------------
// Stress–strain plot (central panel)
// ---------------------------------------------------------------------------

/// Render raw, smoothed and fitted curves for the last analysis run.
pub fn curve_plot(ui: &mut Ui, state: &AppState) {
    let report = match &state.report {
        Some(r) => r,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open CSV files and run the analysis  (File → Open CSVs…)");
            });
            return;
        }
    };

    let palette = generate_palette(report.outcomes.len());

    Plot::new("stress_strain_plot")
        .legend(egui_plot::Legend::default())
        .x_axis_label("Strain")
        .y_axis_label("Stress (MPa)")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (outcome, &color) in report.outcomes.iter().zip(&palette) {
                let Some(curve) = outcome.curve() else {
                    continue;
                };

                if state.show_raw {
                    plot_ui.line(
                        Line::new(to_points(&curve.strain, &curve.stress))
                            .name(format!("{} raw", curve.name))
                            .color(color.gamma_multiply(0.5))
                            .style(LineStyle::dotted_dense())
                            .width(1.0),
                    );
                }

                plot_ui.line(
                    Line::new(to_points(&curve.strain, &curve.smoothed))
                        .name(format!("{} smoothed", curve.name))
                        .color(color)
                        .width(1.5),
                );

                if let Some(fit) = &curve.fit {
                    plot_ui.line(
                        Line::new(to_points(&fit.fit_x, &fit.fit_y))
                            .name(fit_label(&curve.name, fit.modulus, fit.r_squared))
                            .color(color)
                            .style(LineStyle::dashed_loose())
                            .width(2.0),
                    );
                }
            }

            if let Some(Ok(avg)) = &report.average {
                plot_ui.line(
                    Line::new(to_points(&avg.strain, &avg.avg_stress))
                        .name(format!("average of {}", avg.n_curves))
                        .color(Color32::WHITE)
                        .width(2.5),
                );
                if let Some(fit) = &avg.fit {
                    plot_ui.line(
                        Line::new(to_points(&fit.fit_x, &fit.fit_y))
                            .name(fit_label("average", fit.modulus, fit.r_squared))
                            .color(Color32::LIGHT_GRAY)
                            .style(LineStyle::dashed_loose())
                            .width(2.5),
                    );
                }
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_label_formats_modulus_and_r_squared() {
        assert_eq!(
            fit_label("a.csv", 2012.3456, Some(0.9987)),
            "a.csv fit (2012.35 MPa, R²=1.00)"
        );
        assert_eq!(fit_label("avg", 5.0, None), "avg fit (5.00 MPa)");
    }
}
