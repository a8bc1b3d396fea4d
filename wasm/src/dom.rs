//! DOM-backed form view and notifier

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use hazard_report_client::services::{Control, FormView, Notifier};
use js_sys::{Array, Uint8Array};
use shared::format::{media_preview_html, receipt_panel_html, weather_panel_html};
use shared::models::{
    fields, FileKey, HazardReportDraft, Severity, StagedFile, SubmissionReceipt, WeatherPanel,
};
use shared::notify::{escape_html, HtmlSanitizer, Notification};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    DataTransfer, Document, Element, File, FileList, FilePropertyBag, HtmlElement,
    HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
};

use crate::log;

// ============================================================================
// Element IDs
// ============================================================================

pub const FORM_ID: &str = "hazardReportForm";
pub const STATUS_ID: &str = "reportStatus";
pub const WEATHER_ID: &str = "weatherData";
pub const PREVIEW_ID: &str = "mediaPreview";
pub const SEVERITY_ID: &str = "severity";
pub const SEVERITY_VALUE_ID: &str = "severityValue";
pub const LOCATE_BUTTON_ID: &str = "getCurrentLocationBtn";
pub const SEARCH_BUTTON_ID: &str = "searchBtn";
pub const SEARCH_INPUT_ID: &str = "mapSearch";
const MEDIA_LABEL_SELECTOR: &str = ".file-input-label";

/// Missing elements are reported as errors instead of panicking
pub fn element(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{}", id)))
}

fn control_value(el: &Element) -> String {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

fn set_control_value(el: &Element, value: &str) {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        select.set_value(value);
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        area.set_value(value);
    }
}

// ============================================================================
// Form View
// ============================================================================

pub struct DomFormView {
    document: Document,
    form: Element,
    sanitizer: HtmlSanitizer,
    // button markup saved while a control shows its spinner
    idle_labels: RefCell<HashMap<Control, String>>,
}

impl DomFormView {
    pub fn new(document: Document) -> Result<Self, JsValue> {
        let form = element(&document, FORM_ID)?;
        Ok(Self {
            document,
            form,
            sanitizer: HtmlSanitizer::new(),
            idle_labels: RefCell::new(HashMap::new()),
        })
    }

    /// Form control by `name`, falling back to the element id
    fn control(&self, name: &str) -> Option<Element> {
        self.form
            .query_selector(&format!("[name=\"{}\"]", name))
            .ok()
            .flatten()
            .or_else(|| self.document.get_element_by_id(name))
    }

    fn value(&self, name: &str) -> String {
        self.control(name)
            .map(|el| control_value(&el))
            .unwrap_or_default()
    }

    fn optional(&self, name: &str) -> Option<String> {
        Some(self.value(name)).filter(|v| !v.trim().is_empty())
    }

    fn button(&self, control: Control) -> Option<Element> {
        match control {
            Control::Submit => self
                .form
                .query_selector("button[type=\"submit\"]")
                .ok()
                .flatten(),
            Control::Locate => self.document.get_element_by_id(LOCATE_BUTTON_ID),
            Control::Search => self.document.get_element_by_id(SEARCH_BUTTON_ID),
        }
    }

    fn set_html(&self, id: &str, html: &str) {
        match self.document.get_element_by_id(id) {
            Some(el) => el.set_inner_html(html),
            None => log::warn(&format!("missing #{}", id)),
        }
    }

    fn clear_marks(&self) -> Result<(), JsValue> {
        let marked = self.form.query_selector_all(".is-invalid, .is-valid")?;
        for i in 0..marked.length() {
            if let Some(el) = marked.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                el.class_list().remove_2("is-invalid", "is-valid")?;
            }
        }
        Ok(())
    }

    fn preview_tile(&self, file: &StagedFile) -> Result<Element, JsValue> {
        let key = file.key();
        let tile = self.document.create_element("div")?;
        tile.set_class_name("media-preview-item");
        tile.set_id(&key.element_id());
        tile.set_attribute("data-name", &file.name)?;
        tile.set_attribute("data-size", &file.size.to_string())?;
        tile.set_inner_html(&media_preview_html(file, &self.sanitizer));
        Ok(tile)
    }

    fn replace_input_files(&self, files: &[StagedFile]) -> Result<(), JsValue> {
        let Some(input) = self
            .control(fields::MEDIA_FILES)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            return Ok(());
        };
        let transfer = DataTransfer::new()?;
        for staged in files {
            let bytes = Uint8Array::from(staged.data.as_slice());
            let bag = FilePropertyBag::new();
            bag.set_type(&staged.mime_type);
            let file = File::new_with_u8_array_sequence_and_options(
                &Array::of1(&bytes),
                &staged.name,
                &bag,
            )?;
            transfer.items().add_with_file(&file)?;
        }
        input.set_files(transfer.files().as_ref());
        Ok(())
    }
}

impl FormView for DomFormView {
    fn read_draft(&self) -> HazardReportDraft {
        HazardReportDraft {
            user_id: self.value(fields::USER_ID),
            hazard_type: self.value(fields::HAZARD_TYPE),
            severity: self.value(fields::SEVERITY).trim().parse().unwrap_or_default(),
            description: self.value(fields::DESCRIPTION).trim().to_string(),
            location_name: self.value(fields::LOCATION_NAME),
            latitude: self.value(fields::LATITUDE),
            longitude: self.value(fields::LONGITUDE),
            weather_conditions: self.value(fields::WEATHER_CONDITIONS),
            contact_email: self.optional(fields::CONTACT_EMAIL),
            contact_phone: self.optional(fields::CONTACT_PHONE),
        }
    }

    fn set_field(&self, name: &str, value: &str) {
        if let Some(el) = self.control(name) {
            set_control_value(&el, value);
        }
    }

    fn set_field_invalid(&self, name: &str, invalid: bool) {
        if let Some(el) = self.control(name) {
            let _ = el.class_list().toggle_with_force("is-invalid", invalid);
        }
    }

    fn focus_field(&self, name: &str) {
        if let Some(el) = self
            .control(name)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let _ = el.focus();
        }
    }

    fn clear_fields(&self) {
        if let Some(form) = self.form.dyn_ref::<HtmlFormElement>() {
            form.reset();
        }
        // hidden inputs keep their value across a form reset
        for name in [
            fields::LATITUDE,
            fields::LONGITUDE,
            fields::LOCATION_NAME,
            fields::WEATHER_CONDITIONS,
        ] {
            self.set_field(name, "");
        }
        if let Err(e) = self.clear_marks() {
            log::error("clearing validation marks", &e);
        }
    }

    fn show_severity(&self, severity: Severity) {
        self.set_field(SEVERITY_ID, &severity.level().to_string());
        if let Some(label) = self
            .document
            .get_element_by_id(SEVERITY_VALUE_ID)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            label.set_text_content(Some(severity.label()));
            let _ = label.style().set_property("color", severity.color());
        }
    }

    fn set_busy(&self, control: Control, busy: bool) {
        let Some(button) = self.button(control) else {
            return;
        };
        if busy {
            self.idle_labels
                .borrow_mut()
                .insert(control, button.inner_html());
            let _ = button.set_attribute("disabled", "");
            button.set_inner_html(match control {
                Control::Submit => {
                    r#"<i class="fas fa-spinner fa-spin"></i> Submitting report..."#
                }
                Control::Locate => {
                    r#"<i class="fas fa-spinner fa-spin"></i> Getting location..."#
                }
                Control::Search => r#"<i class="fas fa-spinner fa-spin"></i>"#,
            });
        } else {
            let _ = button.remove_attribute("disabled");
            if let Some(label) = self.idle_labels.borrow_mut().remove(&control) {
                button.set_inner_html(&label);
            }
        }
    }

    fn show_weather(&self, panel: &WeatherPanel) {
        self.set_html(WEATHER_ID, &weather_panel_html(panel, &self.sanitizer));
    }

    fn show_receipt(&self, receipt: &SubmissionReceipt) {
        self.set_html(STATUS_ID, &receipt_panel_html(receipt, &self.sanitizer));
    }

    fn clear_status(&self) {
        self.set_html(STATUS_ID, "");
    }

    fn add_preview(&self, file: &StagedFile) {
        let Some(container) = self.document.get_element_by_id(PREVIEW_ID) else {
            return;
        };
        let appended = self
            .preview_tile(file)
            .and_then(|tile| container.append_child(&tile));
        if let Err(e) = appended {
            log::error("rendering media preview", &e);
        }
    }

    fn remove_preview(&self, key: &FileKey) {
        if let Some(tile) = self.document.get_element_by_id(&key.element_id()) {
            tile.remove();
        }
    }

    fn clear_previews(&self) {
        self.set_html(PREVIEW_ID, "");
    }

    fn sync_file_input(&self, files: &[StagedFile]) {
        if let Err(e) = self.replace_input_files(files) {
            log::error("updating file input", &e);
        }
    }

    fn set_media_label(&self, label: &str) {
        let Ok(Some(el)) = self.document.query_selector(MEDIA_LABEL_SELECTOR) else {
            return;
        };
        let icon = if label.ends_with("selected") {
            "fa-check"
        } else {
            "fa-upload"
        };
        el.set_inner_html(&format!(
            r#"<i class="fas {}"></i> {}"#,
            icon,
            escape_html(label)
        ));
    }
}

// ============================================================================
// Notifier
// ============================================================================

/// Prepends alerts to the status area and removes them after their timeout
pub struct DomNotifier {
    document: Document,
    sanitizer: HtmlSanitizer,
    next_id: Cell<u64>,
}

impl DomNotifier {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            sanitizer: HtmlSanitizer::new(),
            next_id: Cell::new(0),
        }
    }

    fn show(&self, notification: &Notification) -> Result<(), JsValue> {
        let Some(status) = self.document.get_element_by_id(STATUS_ID) else {
            log::info(&format!(
                "[{}] {}",
                notification.kind.to_string().to_uppercase(),
                notification.message
            ));
            return Ok(());
        };

        let id = format!("alert-{}", self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);

        let alert = self.document.create_element("div")?;
        alert.set_id(&id);
        alert.set_inner_html(&notification.render_html(&self.sanitizer));
        if let Some(close) = alert.query_selector(".btn-close")? {
            close.set_attribute("onclick", "this.closest('[id^=alert-]').remove()")?;
        }
        status.insert_before(&alert, status.first_child().as_ref())?;

        if let Some(timeout) = notification.timeout {
            let document = self.document.clone();
            let dismiss = Closure::once_into_js(move || {
                if let Some(el) = document.get_element_by_id(&id) {
                    el.remove();
                }
            });
            let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
            window.set_timeout_with_callback_and_timeout_and_arguments_0(
                dismiss.unchecked_ref(),
                timeout.as_millis() as i32,
            )?;
        }
        Ok(())
    }
}

impl Notifier for DomNotifier {
    fn notify(&self, notification: Notification) {
        if let Err(e) = self.show(&notification) {
            log::error("showing alert", &e);
        }
    }
}

// ============================================================================
// File Input
// ============================================================================

/// Turn a picker selection into staging candidates.
///
/// Files that will be rejected anyway by size or type are not read.
pub async fn read_selection(list: &FileList) -> Vec<StagedFile> {
    let mut candidates = Vec::with_capacity(list.length() as usize);
    for i in 0..list.length() {
        let Some(file) = list.get(i) else {
            continue;
        };
        let name = file.name();
        let mime_type = file.type_();
        let size = file.size() as u64;

        let readable = size <= shared::validation::MAX_FILE_SIZE
            && shared::types::MediaKind::from_mime(&mime_type).is_some();
        if !readable {
            candidates.push(StagedFile {
                name,
                size,
                mime_type,
                data: Vec::new(),
            });
            continue;
        }

        match JsFuture::from(file.array_buffer()).await {
            Ok(buffer) => {
                let data = Uint8Array::new(&buffer).to_vec();
                candidates.push(StagedFile {
                    name,
                    size,
                    mime_type,
                    data,
                });
            }
            Err(e) => log::error(&format!("reading {}", name), &e),
        }
    }
    candidates
}
