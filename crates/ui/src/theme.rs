use tzclock_protocol::ThemeToken;

pub fn resolve(token: ThemeToken) -> egui::Color32 {
    let [r, g, b, a] = token.color().to_rgba8();
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}
