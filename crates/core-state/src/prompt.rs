//! Single-line prompt (find, replace, go to line, open, save as).

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    Find,
    ReplaceTerm,
    ReplaceWith { term: String },
    GoToLine,
    Open,
    SaveAs,
}

impl PromptKind {
    pub fn label(&self) -> &'static str {
        match self {
            PromptKind::Find => "Find: ",
            PromptKind::ReplaceTerm => "Replace: ",
            PromptKind::ReplaceWith { .. } => "Replace with: ",
            PromptKind::GoToLine => "Go to line: ",
            PromptKind::Open => "Open: ",
            PromptKind::SaveAs => "Save as: ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: String,
}

#[derive(Debug, Default, Clone)]
pub struct PromptState {
    current: Option<Prompt>,
}

impl PromptState {
    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&Prompt> {
        self.current.as_ref()
    }

    /// Open a prompt, replacing any active one.
    pub fn begin(&mut self, kind: PromptKind) {
        self.begin_with(kind, String::new());
    }

    pub fn begin_with(&mut self, kind: PromptKind, initial: impl Into<String>) {
        self.current = Some(Prompt {
            kind,
            input: initial.into(),
        });
    }

    pub fn push_char(&mut self, ch: char) {
        if let Some(p) = self.current.as_mut() {
            p.input.push(ch);
        }
    }

    pub fn push_str(&mut self, s: &str) {
        if let Some(p) = self.current.as_mut() {
            p.input.extend(s.chars().filter(|c| *c != '\n' && *c != '\r'));
        }
    }

    pub fn backspace(&mut self) {
        if let Some(p) = self.current.as_mut() {
            p.input.pop();
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Close the prompt and hand back its content.
    pub fn take(&mut self) -> Option<Prompt> {
        self.current.take()
    }

    /// Text shown on the message line while the prompt is open.
    pub fn display(&self) -> Option<String> {
        self.current
            .as_ref()
            .map(|p| format!("{}{}", p.kind.label(), p.input))
    }
}
