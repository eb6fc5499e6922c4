/// A layer of server configuration. Each source answers only for the
/// settings it actually carries; `None` means "defer to a lower layer".
pub trait ConfigProvider: Send + Sync {
    fn host(&self) -> Option<&str>;
    fn port(&self) -> Option<u16>;
    fn cors(&self) -> Option<bool>;
    fn log_format(&self) -> Option<&str>;
    fn log_level(&self) -> Option<&str>;
}
