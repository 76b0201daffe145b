//! Clock view layer - pure rendering, no business logic.

use cssclock_core::modules::clock::layers::{ClockLayers, Layer};
use iced::{
    ContentFit, Element, Length, Radians, Rotation,
    widget::{Stack, container, image},
};

use crate::app::Message;

/// Stack the layers bottom to top inside a fixed-size face.
///
/// Every image keeps its natural size and rotates about its centre without
/// affecting layout. A missing file renders as an empty layer.
pub fn render_clock(layers: &ClockLayers, padding: u16) -> Element<'static, Message> {
    let size = layers.iter().next().map(Layer::size);
    let (width, height) = size.map_or((0.0, 0.0), |size| {
        (size.width as f32, size.height as f32)
    });

    let face = Stack::with_children(layers.iter().map(render_layer))
        .width(Length::Fixed(width))
        .height(Length::Fixed(height));

    container(face).padding(padding).center(Length::Fill).into()
}

fn render_layer(layer: &Layer) -> Element<'static, Message> {
    let size = layer.size();
    let rotation = Rotation::Floating(Radians(layer.rotation().to_radians()));

    image(image::Handle::from_path(layer.source()))
        .width(Length::Fixed(size.width as f32))
        .height(Length::Fixed(size.height as f32))
        .content_fit(ContentFit::None)
        .rotation(rotation)
        .into()
}
