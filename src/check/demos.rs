// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nanostep-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nanostep and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Built-in example programs.

const MIN_FUZZY_RATIO: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoProgram {
    pub name: &'static str,
    pub function: &'static str,
    pub source: &'static str,
}

pub const DEMOS: [DemoProgram; 4] = [
    DemoProgram {
        name: "factorial",
        function: "fac",
        source: "let rec fac n =\n  if n <= 0 then\n    true\n  else\n    n * fac (n - 1);;",
    },
    DemoProgram {
        name: "wwhile",
        function: "wwhile",
        source: "let (x,y) = (\"5\", 5);;\nlet rec wwhile (f,b) =\n  let f b = (x, y) in \n  \
                 if y = true \n  then wwhile (f, x)\n  else x;;",
    },
    DemoProgram {
        name: "loop",
        function: "f",
        source: "let f lst =\n  let rec loop lst acc =\n    if lst = [] then\n      acc\n    \
                 else\n      ()\n  in\n  match loop lst [(0.0,0.0)] with\n    | h :: t -> h;;",
    },
    DemoProgram {
        name: "palindrome",
        function: "palindrome",
        source: "let listReverse l =\n  let rec helper xs = function \n    | [] -> xs \n    \
                 | hd::tl -> helper (hd :: xs) tl \n  in helper [];;\n\n\
                 let palindrome (w : char list) =\n  if (listReverse w) = w \n  then true \n  \
                 else false;;",
    },
];

/// Looks a demo up by name: exact (case-insensitive) first, then the closest fuzzy match.
pub fn find_demo(name: &str) -> Option<&'static DemoProgram> {
    let needle = name.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    if let Some(demo) = DEMOS.iter().find(|demo| demo.name == needle) {
        return Some(demo);
    }

    DEMOS
        .iter()
        .map(|demo| (demo, rapidfuzz::fuzz::ratio(needle.chars(), demo.name.chars())))
        .filter(|(_, ratio)| *ratio >= MIN_FUZZY_RATIO)
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(demo, _)| demo)
}

pub fn demo_names() -> impl Iterator<Item = &'static str> {
    DEMOS.iter().map(|demo| demo.name)
}
