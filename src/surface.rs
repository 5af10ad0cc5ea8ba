//! UI surface seams used by the request controller.
//!
//! The controller never touches a concrete display. Hosts implement these
//! traits over whatever they render to: a terminal, a test recorder, a GUI.

/// Read access to the code input field.
pub trait InputSource {
    fn input_text(&self) -> String;
}

/// Mutable access to the visible output area.
pub trait OutputSink {
    fn clear_output(&mut self);
    fn append_output(&mut self, chunk: &str);
    /// Replace everything shown so far, including partially streamed output.
    fn replace_output(&mut self, text: &str);
    /// Keep the given offset (the end of the accumulated output) in view.
    fn scroll_output_to(&mut self, position: usize);
}

/// Interactive busy state: the trigger control and the loading indicator.
pub trait BusyStateSink {
    fn set_trigger_enabled(&mut self, enabled: bool);
    fn set_loading_visible(&mut self, visible: bool);
}

/// Immediate user-facing notices (the empty-input prompt).
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Everything a request cycle needs from its host.
pub trait Surface: InputSource + OutputSink + BusyStateSink + Notifier {}

impl<T> Surface for T where T: InputSource + OutputSink + BusyStateSink + Notifier + ?Sized {}
