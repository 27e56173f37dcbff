// Copyright 2026 the Vistat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retained scene model for vistat charts.
//!
//! This crate holds the small vocabulary shared by chart generators and
//! renderers:
//! - **Marks** are plain drawable values (rect, path, text) with a stable id
//!   and an explicit z-index.
//! - Marks may carry **hover metadata** (tooltip content + a highlight style)
//!   and **entry-animation metadata** (delay, duration, effect).
//! - A **Scene** is the z-sorted mark list of the currently active chart. It
//!   is replaced wholesale on every render; there is no incremental diffing,
//!   because every chart invocation rebuilds its output from scratch.
//!
//! Text shaping and layout are out of scope; text marks store unshaped
//! strings.

#![no_std]

extern crate alloc;

mod anim;
mod hover;
mod mark;
mod scene;

pub use anim::{EnterEffect, EnterSpec, ease_cubic_in_out};
pub use hover::{Highlight, HoverSpec};
pub use mark::{
    Mark, MarkId, MarkPayload, PathPayload, RectPayload, StrokePaint, TextAnchor, TextBaseline,
    TextPayload,
};
pub use scene::Scene;
