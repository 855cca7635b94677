// SPDX-License-Identifier: LGPL-2.1
// Copyright 2025 Daniel Vogelbacher <daniel@chaospixel.com>

//! Vertical lifting steps.
//!
//! A vertical step updates one target row from rows of the opposite
//! parity. All rows live in the shared plane, they are addressed by
//! sample offsets and split into disjoint slices before a kernel runs.

use itertools::izip;

use super::*;
use crate::sample::Coefficient;

/// Split a mutable target row and `N` read-only source rows out of `buf`.
///
/// Source rows must not overlap the target row. Offsets are sample offsets
/// of the first sample of each row, `width` samples are taken per row.
pub fn split_rows<T, const N: usize>(buf: &mut [T], target: usize, sources: [usize; N], width: usize) -> (&mut [T], [&[T]; N]) {
  let (head, tail) = buf.split_at_mut(target);
  let (row, after) = tail.split_at_mut(width);
  let head: &[T] = head;
  let after: &[T] = after;
  let rows = sources.map(move |off| {
    debug_assert_ne!(off, target, "source row aliases target row");
    if off < target {
      &head[off..off + width]
    } else {
      &after[off - target - width..][..width]
    }
  });
  (row, rows)
}

/// Split two distinct mutable rows out of `buf`, returned in argument order
pub fn split_pair<T>(buf: &mut [T], first: usize, second: usize, width: usize) -> (&mut [T], &mut [T]) {
  if first < second {
    let (a, b) = buf.split_at_mut(second);
    (&mut a[first..first + width], &mut b[..width])
  } else {
    let (a, b) = buf.split_at_mut(first);
    (&mut b[..width], &mut a[second..second + width])
  }
}

#[inline(always)]
fn lift3<T: Coefficient>(target: &mut [T], b0: &[T], b2: &[T], op: impl Fn(i32, i32, i32) -> i32) {
  let w = target.len();
  for (t, a, c) in izip!(target.iter_mut(), &b0[..w], &b2[..w]) {
    *t = T::from_i32(op(a.to_i32(), t.to_i32(), c.to_i32()));
  }
}

#[inline(always)]
fn lift5<T: Coefficient>(target: &mut [T], src: [&[T]; 4], op: impl Fn(i32, i32, i32, i32, i32) -> i32) {
  let w = target.len();
  let [b0, b1, b3, b4] = src.map(|row| &row[..w]);
  for (t, a0, a1, a3, a4) in izip!(target.iter_mut(), b0, b1, b3, b4) {
    *t = T::from_i32(op(a0.to_i32(), a1.to_i32(), t.to_i32(), a3.to_i32(), a4.to_i32()));
  }
}

pub fn legall_l0<T: Coefficient>(target: &mut [T], [b0, b2]: [&[T]; 2]) {
  lift3(target, b0, b2, compose_53i_l0);
}

pub fn legall_h0<T: Coefficient>(target: &mut [T], [b0, b2]: [&[T]; 2]) {
  lift3(target, b0, b2, compose_dirac53i_h0);
}

pub fn dd97_h0<T: Coefficient>(target: &mut [T], src: [&[T]; 4]) {
  lift5(target, src, compose_dd97i_h0);
}

pub fn dd137_l0<T: Coefficient>(target: &mut [T], src: [&[T]; 4]) {
  lift5(target, src, compose_dd137i_l0);
}

pub fn daub97_l1<T: Coefficient>(target: &mut [T], [b0, b2]: [&[T]; 2]) {
  lift3(target, b0, b2, compose_daub97i_l1);
}

pub fn daub97_h1<T: Coefficient>(target: &mut [T], [b0, b2]: [&[T]; 2]) {
  lift3(target, b0, b2, compose_daub97i_h1);
}

pub fn daub97_l0<T: Coefficient>(target: &mut [T], [b0, b2]: [&[T]; 2]) {
  lift3(target, b0, b2, compose_daub97i_l0);
}

pub fn daub97_h0<T: Coefficient>(target: &mut [T], [b0, b2]: [&[T]; 2]) {
  lift3(target, b0, b2, compose_daub97i_h0);
}

/// Haar row pair: low row first, then the high row from the new low row
pub fn haar<T: Coefficient>(low: &mut [T], high: &mut [T]) {
  let w = low.len();
  for (l, h) in low.iter_mut().zip(&mut high[..w]) {
    let lv = compose_haari_l0(l.to_i32(), h.to_i32());
    *l = T::from_i32(lv);
    *h = T::from_i32(compose_haari_h0(h.to_i32(), l.to_i32()));
  }
}

pub fn fidelity_h0<T: Coefficient>(target: &mut [T], src: [&[T]; 8]) {
  for (x, t) in target.iter_mut().enumerate() {
    let v = src.map(|row| row[x].to_i32());
    *t = T::from_i32(compose_fidelityi_h0(v, t.to_i32()));
  }
}

pub fn fidelity_l0<T: Coefficient>(target: &mut [T], src: [&[T]; 8]) {
  for (x, t) in target.iter_mut().enumerate() {
    let v = src.map(|row| row[x].to_i32());
    *t = T::from_i32(compose_fidelityi_l0(v, t.to_i32()));
  }
}
