use crate::{
    compose::{ClassList, Composition, Decoration, INPUT_BASE, class_list},
    vdom::{Element, Node},
};

/// Element attached before or after an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Adornment {
    Icon { name: String },
    Label { text: String },
    Action { text: String },
}

impl Adornment {
    pub fn icon(name: impl Into<String>) -> Self {
        Adornment::Icon { name: name.into() }
    }

    pub fn label(text: impl Into<String>) -> Self {
        Adornment::Label { text: text.into() }
    }

    pub fn action(text: impl Into<String>) -> Self {
        Adornment::Action { text: text.into() }
    }

    pub fn decoration(&self) -> Decoration {
        match self {
            Adornment::Icon { .. } => Decoration::Icon,
            Adornment::Label { .. } => Decoration::Label,
            Adornment::Action { .. } => Decoration::Action,
        }
    }

    pub fn view(&self) -> Node {
        match self {
            Adornment::Icon { name } => Element::new("i")
                .with_class(ClassList::from_tokens(name.split_whitespace()))
                .class("icon")
                .into(),
            Adornment::Label { text } => Element::new("div")
                .class("ui")
                .class("label")
                .child(Node::text(text.clone()))
                .into(),
            Adornment::Action { text } => Element::new("button")
                .class("ui")
                .class("button")
                .child(Node::text(text.clone()))
                .into(),
        }
    }
}

fn decoration_of(adornment: Option<&Adornment>) -> Decoration {
    adornment.map_or(Decoration::None, Adornment::decoration)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    prepend: Option<Adornment>,
    append: Option<Adornment>,
    fluid: bool,
    input_type: String,
    name: Option<String>,
    placeholder: Option<String>,
    read_only: bool,
}

impl Default for Input {
    fn default() -> Self {
        Self {
            prepend: None,
            append: None,
            fluid: false,
            input_type: "text".to_string(),
            name: None,
            placeholder: None,
            read_only: false,
        }
    }
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prepend(mut self, adornment: Adornment) -> Self {
        self.prepend = Some(adornment);
        self
    }

    pub fn with_append(mut self, adornment: Adornment) -> Self {
        self.append = Some(adornment);
        self
    }

    pub fn with_fluid(mut self, fluid: bool) -> Self {
        self.fluid = fluid;
        self
    }

    pub fn with_type(mut self, input_type: impl Into<String>) -> Self {
        self.input_type = input_type.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn input_type(&self) -> &str {
        &self.input_type
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn composition(&self) -> Composition {
        Composition::new(
            decoration_of(self.prepend.as_ref()),
            decoration_of(self.append.as_ref()),
        )
        .with_fluid(self.fluid)
    }

    pub fn class_list(&self) -> ClassList {
        let mut classes = class_list(&INPUT_BASE, &self.composition());
        if self.input_type == "hidden" {
            classes.push("hidden");
        }
        classes
    }

    /// `div` root with `[prepend?, input, append?]` children.
    pub fn view(&self, value: &str) -> Node {
        let mut input = Element::new("input").attr("type", self.input_type.clone());
        if let Some(name) = &self.name {
            input = input.attr("name", name.clone());
        }
        if let Some(placeholder) = &self.placeholder {
            input = input.attr("placeholder", placeholder.clone());
        }
        if self.read_only {
            input = input.attr("readonly", "readonly");
        }
        input = input.attr("value", value);

        Element::new("div")
            .with_class(self.class_list())
            .children(self.prepend.as_ref().map(Adornment::view))
            .child(input)
            .children(self.append.as_ref().map(Adornment::view))
            .into()
    }
}
