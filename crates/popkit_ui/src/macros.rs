//! Macros for reducing builder boilerplate in widget configuration.

/// Generates a builder-style setter method for a field.
///
/// # Usage
///
/// ```ignore
/// // When method name matches field name:
/// builder_field!(multiple, bool);
/// // Generates: pub fn multiple(mut self, value: bool) -> Self { self.multiple = value; self }
///
/// // When method name differs from field name:
/// builder_field!(default_open, initially_open, bool);
/// ```
#[macro_export]
macro_rules! builder_field {
    ($name:ident, $type:ty) => {
        pub fn $name(mut self, value: $type) -> Self {
            self.$name = value;
            self
        }
    };
    ($method:ident, $field:ident, $type:ty) => {
        pub fn $method(mut self, value: $type) -> Self {
            self.$field = value;
            self
        }
    };
}

/// Generates a builder-style setter method for an Option field.
#[macro_export]
macro_rules! builder_option {
    ($name:ident, $type:ty) => {
        pub fn $name(mut self, value: $type) -> Self {
            self.$name = Some(value);
            self
        }
    };
}

/// Generates a setter storing a [`Callback`](crate::Callback) whose
/// message type is the surrounding impl's `M`.
///
/// # Usage
///
/// ```ignore
/// callback_setter!(on_open_change, bool);
/// // Generates: pub fn on_open_change<F>(mut self, f: F) -> Self where F: Fn(bool) -> M + 'static
/// ```
#[macro_export]
macro_rules! callback_setter {
    ($name:ident, $param:ty) => {
        pub fn $name<F>(mut self, f: F) -> Self
        where
            F: Fn($param) -> M + 'static,
        {
            self.$name = $crate::callback::Callback::new(f);
            self
        }
    };
}
