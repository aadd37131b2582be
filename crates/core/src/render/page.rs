use tera::{Context, Tera};

use super::{gwei::RenderError, labels::GasFeeDisplay};
use crate::gas::FeeEstimatorError;

const PAGE_TEMPLATE: &str = "page.html";
const ERROR_TEMPLATE: &str = "error.html";

fn heading(network_name: &str) -> String {
    format!("Average gas fee for {} (Gwei)", network_name)
}

// `.html` names switch on tera's autoescaping
fn render_tera(template: &str, context: &Context) -> Result<String, RenderError> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("base.html", include_str!("templates/base.html")),
        (PAGE_TEMPLATE, include_str!("templates/page.html")),
        (ERROR_TEMPLATE, include_str!("templates/error.html")),
    ])
    .map_err(|e| RenderError::Template(e.to_string()))?;

    tera.render(template, context).map_err(|e| RenderError::Template(e.to_string()))
}

/// Renders the average gas fee page.
pub fn render_page(display: &GasFeeDisplay, network_name: &str) -> Result<String, RenderError> {
    let mut context = Context::new();
    context.insert("heading", &heading(network_name));
    context.insert("rows", &display.rows);

    render_tera(PAGE_TEMPLATE, &context)
}

/// Renders the failure state shown when no estimate could be produced.
pub fn render_error_page(
    error: &FeeEstimatorError,
    network_name: &str,
) -> Result<String, RenderError> {
    let mut context = Context::new();
    context.insert("heading", &heading(network_name));
    context.insert("kind", error.kind());
    context.insert("message", &error.to_string());

    render_tera(ERROR_TEMPLATE, &context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{gas::FeeEstimate, render::PriorityLabels};

    #[test]
    fn test_render_page_lists_every_tier() {
        let estimate =
            FeeEstimate { low: 1_230_000_000, medium: 4_560_000_000, high: 7_890_000_000 };
        let display = GasFeeDisplay::new(&estimate, PriorityLabels::Matching).unwrap();

        let html = render_page(&display, "ETH Mainnet").unwrap();

        assert!(html.contains("<h2>Average gas fee for ETH Mainnet (Gwei)</h2>"));
        assert!(html.contains("<p data-tier=\"high\">High Priority: 7.89 Gwei</p>"));
        assert!(html.contains("<p data-tier=\"medium\">Medium Priority: 4.56 Gwei</p>"));
        assert!(html.contains("<p data-tier=\"low\">Low Priority: 1.23 Gwei</p>"));
    }

    #[test]
    fn test_render_page_escapes_network_name() {
        let estimate = FeeEstimate { low: 0, medium: 0, high: 0 };
        let display = GasFeeDisplay::new(&estimate, PriorityLabels::Matching).unwrap();

        let html = render_page(&display, "<script>").unwrap();

        assert!(!html.contains("<script>"));
        assert!(html.contains("<h2>Average gas fee for &lt;script&gt; (Gwei)</h2>"));
        assert!(html.contains("<title>Average gas fee for &lt;script&gt; (Gwei)</title>"));
    }

    #[test]
    fn test_render_error_page_shows_kind() {
        let html = render_error_page(&FeeEstimatorError::EmptySampleSet, "ETH Mainnet").unwrap();

        assert!(html.contains("data-kind=\"empty_sample_set\""));
        assert!(html.contains("Gas fees are unavailable: No fee history samples to average"));
    }

    #[test]
    fn test_render_error_page_escapes_message() {
        let error = FeeEstimatorError::MalformedResponse("<b>\"bad\"</b>".to_string());

        let html = render_error_page(&error, "ETH Mainnet").unwrap();

        assert!(html.contains("data-kind=\"malformed_response\""));
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;b&gt;&quot;bad&quot;"));
    }
}
