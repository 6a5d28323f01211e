use crate::draw::input::{PointerButtons, PointerId, PointerSample};
use crate::draw::model::{Rgb, Tool};
use crate::draw::overlay::InkOverlay;
use crate::draw::render::{DirtyRect, PRESSURE_UNKNOWN};
use crate::draw::settings::OverlaySettings;
use crate::draw::surface::BoxHost;
use crate::draw::toolbar::{CursorStyle, ToolbarCommand};
use eframe::egui;

const MOUSE: PointerId = PointerId(1);
const PAGE_STEP: f32 = 240.0;

/// Demo host: a growable page inside a scroll area with the ink overlay on top.
pub struct InkDemoApp {
    host: BoxHost,
    overlay: Option<InkOverlay>,
    texture: Option<egui::TextureHandle>,
    texture_size: (u32, u32),
    pending: Vec<DirtyRect>,
    page_height: f32,
    last_screen: egui::Rect,
}

impl InkDemoApp {
    pub fn new(settings: &OverlaySettings) -> Self {
        let mut host = BoxHost::new(0, 0);
        let overlay = InkOverlay::mount(&mut host, settings);
        Self {
            host,
            overlay: Some(overlay),
            texture: None,
            texture_size: (0, 0),
            pending: Vec::new(),
            page_height: PAGE_STEP * 3.0,
            last_screen: egui::Rect::NOTHING,
        }
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) -> Vec<ToolbarCommand> {
        let mut commands = Vec::new();
        let Some(overlay) = self.overlay.as_ref() else {
            return commands;
        };
        let view = overlay.toolbar_view();

        ui.heading("Ink");
        let toggle = if view.active { "Stop drawing" } else { "Draw" };
        if ui.selectable_label(view.active, toggle).clicked() {
            commands.push(ToolbarCommand::ToggleActive);
        }
        ui.separator();

        for tool in Tool::ALL {
            if ui.selectable_label(view.is_selected(tool), tool.label()).clicked() {
                commands.push(ToolbarCommand::SelectTool(tool));
            }
        }
        ui.separator();

        ui.add_enabled_ui(view.color_enabled, |ui| {
            let mut rgb = [view.color.r, view.color.g, view.color.b];
            ui.horizontal(|ui| {
                if ui.color_edit_button_srgb(&mut rgb).changed() {
                    commands.push(ToolbarCommand::SetColor(Rgb::new(rgb[0], rgb[1], rgb[2])));
                }
                ui.monospace(&view.color_hex);
            });
            ui.horizontal_wrapped(|ui| {
                for (index, swatch) in view.quick_colors.iter().enumerate() {
                    let button = egui::Button::new("")
                        .fill(egui::Color32::from_rgb(swatch.r, swatch.g, swatch.b))
                        .min_size(egui::vec2(18.0, 18.0));
                    if ui.add(button).on_hover_text(swatch.to_hex()).clicked() {
                        commands.push(ToolbarCommand::QuickColor(index));
                    }
                }
            });
        });
        ui.separator();

        let mut size = view.size;
        if ui
            .add(egui::Slider::new(&mut size, 1..=100).text(view.size_label))
            .changed()
        {
            commands.push(ToolbarCommand::SetSize(size));
        }
        ui.separator();

        if ui.button("Grow page").clicked() {
            self.page_height += PAGE_STEP;
        }
        commands
    }

    fn page(&mut self, ui: &mut egui::Ui) {
        let ppp = ui.ctx().pixels_per_point();
        let width = ui.available_width();
        let (rect, _response) =
            ui.allocate_exact_size(egui::vec2(width, self.page_height), egui::Sense::hover());

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, egui::Color32::from_gray(248));
        let mut y = rect.min.y + 24.0;
        let mut row = 1;
        while y < rect.max.y - 24.0 {
            painter.text(
                egui::pos2(rect.min.x + 24.0, y),
                egui::Align2::LEFT_TOP,
                format!("Paragraph {row}"),
                egui::FontId::proportional(14.0),
                egui::Color32::DARK_GRAY,
            );
            y += 48.0;
            row += 1;
        }

        self.host.set_origin(rect.min.x * ppp, rect.min.y * ppp);
        self.host.resize_container(
            (rect.width() * ppp).round().max(0.0) as u32,
            (rect.height() * ppp).round().max(0.0) as u32,
        );

        self.handle_pointer(ui.ctx(), rect, ppp);
        self.upload(ui.ctx());

        if let Some(texture) = &self.texture {
            painter.image(
                texture.id(),
                rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }
    }

    fn handle_pointer(&mut self, ctx: &egui::Context, rect: egui::Rect, ppp: f32) {
        let Some(overlay) = self.overlay.as_mut() else {
            return;
        };
        overlay.pump_resizes(&self.host);

        let (pos, pressed, down, released) = ctx.input(|i| {
            (
                i.pointer.latest_pos(),
                i.pointer.primary_pressed(),
                i.pointer.primary_down(),
                i.pointer.primary_released(),
            )
        });
        let Some(pos) = pos else {
            return;
        };
        let buttons = if down {
            PointerButtons::PRIMARY
        } else {
            PointerButtons::NONE
        };
        let sample = PointerSample {
            pointer_id: MOUSE,
            client: (pos.x * ppp, pos.y * ppp),
            pressure: PRESSURE_UNKNOWN,
            buttons,
        };
        let inside = rect.contains(pos);

        if inside && overlay.input_policy().cursor == CursorStyle::Crosshair {
            ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
        }
        if !overlay.wants_pointer(&sample, inside) {
            return;
        }
        if pressed {
            overlay.pointer_down(&self.host, &sample);
        } else if down {
            if let Some(segment) = overlay.pointer_move(&self.host, &sample) {
                self.pending.extend(segment.dirty);
            }
        }
        if released {
            overlay.pointer_up(&sample);
        }
    }

    fn upload(&mut self, ctx: &egui::Context) {
        let Some(overlay) = self.overlay.as_ref() else {
            return;
        };
        let surface = overlay.surface();
        if !surface.is_drawable() {
            self.texture = None;
            self.pending.clear();
            return;
        }

        let size = surface.size();
        let full = [size.0 as usize, size.1 as usize];
        if self.texture.is_none() || self.texture_size != size {
            let image = egui::ColorImage::from_rgba_premultiplied(full, surface.pixels());
            self.texture = Some(ctx.load_texture("ink-overlay", image, egui::TextureOptions::NEAREST));
            self.texture_size = size;
            self.pending.clear();
            return;
        }

        let Some(texture) = self.texture.as_mut() else {
            return;
        };
        for rect in self.pending.drain(..) {
            let (w, h) = (rect.width as usize, rect.height as usize);
            let mut region = Vec::with_capacity(w * h * 4);
            for y in rect.y as usize..rect.y as usize + h {
                let start = (y * full[0] + rect.x as usize) * 4;
                region.extend_from_slice(&surface.pixels()[start..start + w * 4]);
            }
            let image = egui::ColorImage::from_rgba_premultiplied([w, h], &region);
            texture.set_partial(
                [rect.x as usize, rect.y as usize],
                image,
                egui::TextureOptions::NEAREST,
            );
        }
    }
}

impl eframe::App for InkDemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let screen = ctx.screen_rect();
        if screen != self.last_screen {
            self.last_screen = screen;
            self.host.viewport_resized();
        }

        let commands = egui::SidePanel::left("ink_toolbar")
            .resizable(false)
            .show(ctx, |ui| self.toolbar(ui))
            .inner;
        if let Some(overlay) = self.overlay.as_mut() {
            for command in commands {
                overlay.apply(command);
            }
        }

        let active = self
            .overlay
            .as_ref()
            .is_some_and(|overlay| overlay.state().is_active());
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .drag_to_scroll(!active)
                .show(ui, |ui| self.page(ui));
        });
    }
}

impl Drop for InkDemoApp {
    fn drop(&mut self) {
        if let Some(overlay) = self.overlay.take() {
            overlay.unmount(&mut self.host);
        }
    }
}
