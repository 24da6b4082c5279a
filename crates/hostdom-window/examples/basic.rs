//! Example: a window and document driven by host dimension changes

use hostdom_dom::{Document, Viewport};
use hostdom_window::{Window, WindowConfig};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut window = Window::new(WindowConfig::default(), Viewport::new(375.0, 812.0, 3.0));
    let mut document = Document::with_config(window.document_config());

    let canvas = document
        .create_element("canvas")
        .ok_or_else(|| anyhow::anyhow!("canvas not supported"))?;
    document.append_child(document.body(), canvas)?;
    document.set_attribute(canvas, "id", "stage")?;
    document.register_element_by_id("stage", canvas);

    let context = document.get_context(canvas, "2d", None, None)?;
    if let Some(ctx) = context.as_2d() {
        let metrics = ctx.measure_text("Hello, hostdom");
        println!("text metrics: {}x{}", metrics.width, metrics.height);
    }

    window.performance_mut().mark("ready", None);
    window.on_dimensions_change(Viewport::new(812.0, 375.0, 3.0));
    println!(
        "canvas client size {}x{}, orientation {}",
        document.client_width(canvas)?,
        document.client_height(canvas)?,
        window.orientation()
    );
    println!("{}", serde_json::to_string_pretty(&window.performance().get_entries())?);

    Ok(())
}
