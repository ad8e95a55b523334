//! Theme selection controller.
//!
//! Publishes the selected theme identifier and persists choices through the
//! store's settings table. Color derivation is a presentation concern.

use crate::model::theme::AppTheme;
use crate::service::project_service::ProjectService;

/// View-model for the theme picker.
pub struct ThemeController {
    pub selected_theme: AppTheme,
}

impl ThemeController {
    /// Starts from the persisted theme choice.
    pub fn new(service: &ProjectService) -> Self {
        Self {
            selected_theme: service.theme(),
        }
    }

    pub fn select_theme(&mut self, theme: AppTheme, service: &mut ProjectService) {
        self.selected_theme = theme;
        service.set_theme(theme);
    }
}
