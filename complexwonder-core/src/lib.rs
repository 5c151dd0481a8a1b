pub mod canvas_size;
pub mod complex;
pub mod config;
pub mod error;
pub mod expr;
pub mod parser;
pub mod tokenizer;
pub mod view_state;

pub use canvas_size::CanvasSize;
pub use complex::Complex;
pub use config::{
    get_plot_config, ColorMode, ColorSettings, PlotConfig, DEFAULT_CONFIG, DEFAULT_MAX_VERTICES,
    PLOT_CONFIGS, WIDE_CONFIG,
};
pub use error::{InputError, SyntaxError};
pub use expr::{BinaryOp, Expr, UnaryFunc};
pub use parser::{compile, compile_with, CompileOptions, DEFAULT_MAX_DEPTH};
pub use tokenizer::{tokenize, tokenize_with_mode, Token, TokenKind, TokenStream, TokenizerMode};
pub use view_state::ViewState;
