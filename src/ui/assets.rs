use image::{ImageBuffer, Rgba, RgbaImage};
use std::f32::consts::PI;

pub struct IconGenerator;

impl IconGenerator {
    /// Indicador de progreso: arco de 270º con alpha creciente.
    /// La rotación se aplica en el shader, el icono es estático.
    pub fn generate_spinner_icon(size: u32) -> RgbaImage {
        let center = size as f32 / 2.0;
        let radius = size as f32 * 0.38;
        let thickness = (size as f32 * 0.08).max(1.5);

        ImageBuffer::from_fn(size, size, |x, y| {
            let dx = x as f32 + 0.5 - center;
            let dy = y as f32 + 0.5 - center;
            let dist = (dx * dx + dy * dy).sqrt();

            if (dist - radius).abs() > thickness {
                return Rgba([0, 0, 0, 0]);
            }

            // Ángulo normalizado 0..1 empezando arriba, sentido horario
            let angle = (dx.atan2(-dy) + 2.0 * PI) % (2.0 * PI);
            let t = angle / (2.0 * PI);
            if t > 0.75 {
                return Rgba([0, 0, 0, 0]);
            }
            let alpha = (255.0 * (0.25 + t)).min(255.0) as u8;
            Rgba([255, 255, 255, alpha])
        })
    }

    /// Glifo de error: disco rojo con una cruz blanca.
    pub fn generate_error_icon(size: u32, color: [u8; 4]) -> RgbaImage {
        let center = size as f32 / 2.0;
        let radius = size as f32 * 0.45;
        let arm = radius * 0.55;
        let stroke = (size as f32 * 0.06).max(1.0);

        ImageBuffer::from_fn(size, size, |x, y| {
            let dx = x as f32 + 0.5 - center;
            let dy = y as f32 + 0.5 - center;
            if dx * dx + dy * dy > radius * radius {
                return Rgba([0, 0, 0, 0]);
            }
            let on_cross = dx.abs() <= arm && dy.abs() <= arm && ((dx - dy).abs() <= stroke || (dx + dy).abs() <= stroke);
            if on_cross {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba(color)
            }
        })
    }
}
