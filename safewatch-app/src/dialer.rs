use log::warn;
use safewatch_logic::Dialer;
use tauri::AppHandle;
use tauri_plugin_opener::OpenerExt;

/// Dials by opening a `tel:` URL, the OS hands it to the phone app
pub struct TauriDialer(AppHandle);

impl TauriDialer {
    pub fn new(app: AppHandle) -> Self {
        Self(app)
    }
}

impl Dialer for TauriDialer {
    fn dial(&self, number: &str) {
        let url = format!("tel:{number}");
        if let Err(why) = self.0.opener().open_url(url, None::<&str>) {
            warn!("Couldn't open dialer for {number}: {why:?}");
        }
    }
}
