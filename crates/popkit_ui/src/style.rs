//! Presentation descriptors for popover parts
//!
//! Widgets describe *what* they are (component part, variant, size, state
//! flags) and a [`StyleResolver`] turns that into whatever the rendering layer
//! styles with. The default [`ClassNameResolver`] produces BEM-style class
//! strings. Nothing in the controller reads styling back.

use serde::{Deserialize, Serialize};

use crate::theme::ThemeMode;

/// Which part of a widget is being styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    MenuTrigger,
    MenuContent,
    MenuItem,
    MenuSubmenu,
    SelectTrigger,
    SelectContent,
    SelectOption,
    SelectSearch,
}

impl Part {
    fn block(self) -> &'static str {
        match self {
            Part::MenuTrigger | Part::MenuContent | Part::MenuItem | Part::MenuSubmenu => {
                "dropdown-menu"
            }
            Part::SelectTrigger | Part::SelectContent | Part::SelectOption | Part::SelectSearch => {
                "select"
            }
        }
    }

    fn element(self) -> &'static str {
        match self {
            Part::MenuTrigger | Part::SelectTrigger => "trigger",
            Part::MenuContent | Part::SelectContent => "content",
            Part::MenuItem => "item",
            Part::MenuSubmenu => "submenu",
            Part::SelectOption => "option",
            Part::SelectSearch => "search",
        }
    }
}

/// Visual variant of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Default,
    Outline,
    Ghost,
}

impl Variant {
    pub fn name(self) -> &'static str {
        match self {
            Variant::Default => "default",
            Variant::Outline => "outline",
            Variant::Ghost => "ghost",
        }
    }
}

/// Size scale of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    Sm,
    #[default]
    Md,
    Lg,
}

impl Size {
    pub fn name(self) -> &'static str {
        match self {
            Size::Sm => "sm",
            Size::Md => "md",
            Size::Lg => "lg",
        }
    }
}

/// Interaction state passed through for presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StateFlags {
    pub open: bool,
    pub focused: bool,
    pub disabled: bool,
    pub selected: bool,
    pub checked: bool,
}

impl StateFlags {
    fn names(self) -> impl Iterator<Item = &'static str> {
        [
            (self.open, "open"),
            (self.focused, "focused"),
            (self.disabled, "disabled"),
            (self.selected, "selected"),
            (self.checked, "checked"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
    }
}

/// Everything a resolver needs to style one part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleRequest {
    pub part: Part,
    pub variant: Variant,
    pub size: Size,
    pub state: StateFlags,
}

impl StyleRequest {
    pub fn new(part: Part) -> Self {
        Self {
            part,
            variant: Variant::default(),
            size: Size::default(),
            state: StateFlags::default(),
        }
    }

    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn state(mut self, state: StateFlags) -> Self {
        self.state = state;
        self
    }
}

/// Turns a style request into a presentation descriptor.
pub trait StyleResolver {
    fn resolve(&self, request: &StyleRequest) -> String;
}

/// Builds BEM class names: `pk-select__option pk-select__option--md pk-select__option--focused`.
#[derive(Debug, Clone)]
pub struct ClassNameResolver {
    prefix: String,
    mode: ThemeMode,
}

impl Default for ClassNameResolver {
    fn default() -> Self {
        Self::new("pk")
    }
}

impl ClassNameResolver {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            mode: ThemeMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: ThemeMode) -> Self {
        self.mode = mode;
        self
    }
}

impl StyleResolver for ClassNameResolver {
    fn resolve(&self, request: &StyleRequest) -> String {
        let base = format!(
            "{}-{}__{}",
            self.prefix,
            request.part.block(),
            request.part.element()
        );
        let mut classes = vec![base.clone()];
        if request.variant != Variant::Default {
            classes.push(format!("{base}--{}", request.variant.name()));
        }
        classes.push(format!("{base}--{}", request.size.name()));
        classes.extend(request.state.names().map(|flag| format!("{base}--{flag}")));
        if self.mode == ThemeMode::Light {
            classes.push(format!("{}-theme-light", self.prefix));
        }
        classes.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_request() {
        let resolver = ClassNameResolver::default();
        assert_eq!(
            resolver.resolve(&StyleRequest::new(Part::MenuItem)),
            "pk-dropdown-menu__item pk-dropdown-menu__item--md"
        );
    }

    #[test]
    fn test_state_flags_in_fixed_order() {
        let resolver = ClassNameResolver::default();
        let request = StyleRequest::new(Part::SelectOption)
            .size(Size::Sm)
            .state(StateFlags {
                checked: true,
                focused: true,
                ..StateFlags::default()
            });
        assert_eq!(
            resolver.resolve(&request),
            "pk-select__option pk-select__option--sm pk-select__option--focused pk-select__option--checked"
        );
    }

    #[test]
    fn test_variant_and_light_mode() {
        let resolver = ClassNameResolver::new("ui").with_mode(ThemeMode::Light);
        let request = StyleRequest::new(Part::SelectTrigger).variant(Variant::Outline);
        assert_eq!(
            resolver.resolve(&request),
            "ui-select__trigger ui-select__trigger--outline ui-select__trigger--md ui-theme-light"
        );
    }
}
