// Copyright 2026 the Stitcher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arc-length resampling and motif stamping along vector outlines.
//!
//! `stitcher_core` decorates glyph outlines with repeated motif glyphs
//! (dashes, stitches, dots): each outline is resampled at a fixed interval
//! and a reference to a motif glyph is stamped at every sample, optionally
//! rotated to follow the outline. It is `no_std` compatible (with `alloc`).
//!
//! # Architecture
//!
//! A pass runs per path, orchestrated per layer:
//!
//! ```text
//!   Path ──► segments() ──► sample ──► place / balance ──► dots
//!                                                           │
//!                 ┌─────────────────────────────────────────┘
//!                 ▼
//!   dots + ResolvedMotif ──► emit() ──► PlacedInstance ──► Host
//! ```
//!
//! **[`path`]**: Nodes, outlines, and their split into line and cubic
//! segments.
//!
//! **[`sample`]**: Oversampled points along segments, with tangents.
//!
//! **[`place`]**: Greedy quantization of samples into dots one interval
//! apart, with seam deduplication on closed paths.
//!
//! **[`balance`]**: Two-pass placement that spreads leftover slack over both
//! path ends.
//!
//! **[`orient`]**: Motif anchors and the rotation aligning a motif with the
//! outline.
//!
//! **[`emit`]**: Motif cycling, placed instances, and provenance tags.
//!
//! **[`rebuild`]**: Full, selective, and overlay passes over layers.
//!
//! **[`dirty`]**: Dirty-path tracking via `understory_dirty`.
//!
//! **[`config`]**: [`Configuration`](config::Configuration), persisted
//! preferences, and per-call overrides.
//!
//! **[`host`]**: The [`Host`](host::Host) trait a document model implements.
//!
//! **[`font`]**: An in-memory [`Host`](host::Host).
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! pass instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod balance;
pub mod config;
pub mod dirty;
pub mod emit;
pub mod error;
pub mod font;
pub mod host;
pub mod orient;
pub mod path;
pub mod place;
pub mod rebuild;
pub mod sample;
pub mod trace;
