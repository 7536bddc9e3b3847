use eframe::egui::Ui;
use egui_plot::{
    log_grid_spacer, GridMark, Legend, Line, LineStyle, MarkerShape, Plot, PlotBounds, Points,
};

use crate::color::curve_color;
use crate::controller::X_LIMITS;
use crate::state::AppState;
use crate::surface::CurveId;

// ---------------------------------------------------------------------------
// SED plot (central panel)
// ---------------------------------------------------------------------------

/// Format a log10 axis coordinate as the linear value it stands for.
fn decade_label(mark: GridMark) -> String {
    let exponent = mark.value;
    if (exponent - exponent.round()).abs() > 1e-6 {
        return String::new();
    }
    let exponent = exponent.round() as i32;
    match exponent {
        -1..=3 => format!("{}", 10f64.powi(exponent)),
        _ => format!("1e{exponent}"),
    }
}

/// Render the log-log flux plot from the retained scene.
pub fn model_plot(ui: &mut Ui, state: &mut AppState) {
    let scene = state.controller.surface_mut();
    let reset_bounds = scene.take_bounds_dirty();
    let (y_lower, y_upper) = scene.y_limits();

    Plot::new("sed_plot")
        .legend(Legend::default())
        .x_axis_label("Wavelength (µm)")
        .y_axis_label("Flux Density (cgs)")
        .x_grid_spacer(log_grid_spacer(10))
        .y_grid_spacer(log_grid_spacer(10))
        .x_axis_formatter(|mark, _range| decade_label(mark))
        .y_axis_formatter(|mark, _range| decade_label(mark))
        .allow_double_click_reset(false)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            if reset_bounds {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                    [X_LIMITS.0.log10(), y_lower.log10()],
                    [X_LIMITS.1.log10(), y_upper.log10()],
                ));
            }

            for (id, series) in scene.visible_curves() {
                let points = series.log_points();
                let color = curve_color(id);

                if id.is_scatter() {
                    plot_ui.points(
                        Points::new(points)
                            .name(id.label())
                            .shape(MarkerShape::Square)
                            .radius(4.0)
                            .filled(false)
                            .color(color),
                    );
                } else {
                    let mut line = Line::new(points).name(id.label()).color(color).width(1.5);
                    if id == CurveId::Combined {
                        line = line.style(LineStyle::dashed_loose());
                    }
                    plot_ui.line(line);
                }
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mark(value: f64) -> GridMark {
        GridMark {
            value,
            step_size: 1.0,
        }
    }

    #[test]
    fn test_decade_labels() {
        assert_eq!(decade_label(mark(-1.0)), "0.1");
        assert_eq!(decade_label(mark(2.0)), "100");
        assert_eq!(decade_label(mark(-12.0)), "1e-12");
        assert_eq!(decade_label(mark(0.5)), "");
    }
}
