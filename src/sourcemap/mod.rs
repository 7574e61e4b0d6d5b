//! Source-map VLQ codec and per-chunk arithmetic (spec.md §4.3).
//!
//! The parallel printer discipline: each [`crate::printer::PrintChunk`]'s VLQ
//! stream is computed as if `source_index`, `original_line`/`original_column`
//! and `generated_line`/`generated_column` all start at zero. Joining those
//! chunks into one bundle-wide delta stream therefore requires rewriting the
//! first segment of each chunk relative to wherever the running state left
//! off — the only non-trivial contract in the whole pipeline (spec.md §4.3).

pub mod vlq;

use vlq::{decode_vlq, encode_vlq};

/// `{generated_line, generated_column, source_index, original_line,
/// original_column}` (spec.md §3). All five fields are carried as plain
/// `i32`s; `generated_line` is reused by [`append_source_map_chunk`] as a
/// "lines owed" counter (see below) rather than a position, since the
/// generated line itself is never delta-encoded — it's represented purely by
/// `;` separators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceMapState {
    pub generated_line: i32,
    pub generated_column: i32,
    pub source_index: i32,
    pub original_line: i32,
    pub original_column: i32,
}

/// Writes one segment's four deltas, relative to `prev_state`, into `buffer`.
/// Prepends `,` unless `last_byte` is absent, `;`, or `"` (so a mapping never
/// gets a stray leading comma right after a line break or a JSON string
/// boundary). Updates `prev_state`'s position fields (not `generated_line`,
/// which [`append_source_map_chunk`] manages separately) and returns the new
/// last byte.
pub fn append_mapping(
    buffer: &mut Vec<u8>,
    last_byte: Option<u8>,
    prev_state: &mut SourceMapState,
    current_state: &SourceMapState,
) -> u8 {
    if !matches!(last_byte, None | Some(b';') | Some(b'"')) {
        buffer.push(b',');
    }
    encode_vlq(current_state.generated_column - prev_state.generated_column, buffer);
    encode_vlq(current_state.source_index - prev_state.source_index, buffer);
    encode_vlq(current_state.original_line - prev_state.original_line, buffer);
    encode_vlq(current_state.original_column - prev_state.original_column, buffer);

    prev_state.generated_column = current_state.generated_column;
    prev_state.source_index = current_state.source_index;
    prev_state.original_line = current_state.original_line;
    prev_state.original_column = current_state.original_column;

    *buffer.last().unwrap()
}

/// Appends one module's printed VLQ chunk into the bundle-wide stream.
///
/// `prev_end_state.generated_line` is reused between calls as a count of
/// generated lines the caller has written *outside* of any chunk (bootstrap
/// prelude text, closure braces between groups) since the last chunk was
/// flushed — those lines carry no mapping of their own, so they must be
/// represented purely as literal `;` bytes before the next chunk's mapping
/// data can be trusted to line up. `start_state` gives this chunk's absolute
/// `(source_index, original_line, original_column)` origin (its position in
/// the final `sources` array); `chunk_end_state` is the chunk's own
/// `PrintChunk::end_state`, chunk-local, used only to decide how this
/// chunk's running column carries into the next call.
pub fn append_source_map_chunk(
    out: &mut Vec<u8>,
    prev_end_state: &mut SourceMapState,
    start_state: SourceMapState,
    chunk_end_state: SourceMapState,
    chunk_vlq_bytes: &[u8],
) {
    // Step 1: flush lines owed from unmapped text written since the last chunk.
    for _ in 0..prev_end_state.generated_line {
        out.push(b';');
    }
    let entry_generated_column = if prev_end_state.generated_line > 0 {
        0
    } else {
        prev_end_state.generated_column
    };
    prev_end_state.generated_line = 0;
    prev_end_state.generated_column = entry_generated_column;

    // Step 2: copy through any leading `;` the chunk itself begins with.
    let mut i = 0;
    while chunk_vlq_bytes.get(i) == Some(&b';') {
        out.push(b';');
        i += 1;
        prev_end_state.generated_column = 0;
    }

    // Step 3: rewrite the chunk's first segment relative to the running state.
    if i < chunk_vlq_bytes.len() {
        let (d_col, next) = decode_vlq(chunk_vlq_bytes, i).expect("chunk starts with a valid segment");
        let (d_src, next) = decode_vlq(chunk_vlq_bytes, next).expect("valid vlq");
        let (d_line, next) = decode_vlq(chunk_vlq_bytes, next).expect("valid vlq");
        let (d_col2, next) = decode_vlq(chunk_vlq_bytes, next).expect("valid vlq");

        let absolute = SourceMapState {
            generated_line: 0,
            generated_column: prev_end_state.generated_column + d_col,
            source_index: start_state.source_index + d_src,
            original_line: start_state.original_line + d_line,
            original_column: start_state.original_column + d_col2,
        };

        let last_byte = out.last().copied();
        let mut segment = Vec::new();
        append_mapping(&mut segment, last_byte, prev_end_state, &absolute);
        out.extend_from_slice(&segment);

        // Step 4: the remainder of the chunk is already correct deltas
        // relative to its own first segment, which we just re-anchored.
        out.extend_from_slice(&chunk_vlq_bytes[next..]);

        // Carry this chunk's running column into the next call. A
        // single-line chunk (`chunk_end_state.generated_line == 0`) means its
        // `generated_column` is itself a delta from where we started; a
        // multi-line chunk resets to an absolute column on its own last line.
        if chunk_end_state.generated_line == 0 {
            prev_end_state.generated_column = entry_generated_column + chunk_end_state.generated_column;
        } else {
            prev_end_state.generated_column = chunk_end_state.generated_column;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(bytes: &[u8]) -> Vec<Vec<i32>> {
        bytes
            .split(|&b| b == b';')
            .map(|line| {
                let mut segments = Vec::new();
                for group in line.split(|&b| b == b',') {
                    if group.is_empty() {
                        continue;
                    }
                    let mut vals = Vec::new();
                    let mut off = 0;
                    while off < group.len() {
                        let (v, next) = decode_vlq(group, off).unwrap();
                        vals.push(v);
                        off = next;
                    }
                    segments.push(vals);
                }
                segments.into_iter().flatten().collect()
            })
            .collect()
    }

    /// Scenario E (spec.md §8): two single-line chunks, each holding one
    /// mapping (5, 0, 0, 3), joined with ordering [A, B]. B's first segment
    /// must be rewritten relative to A's end state rather than copied
    /// chunk-locally (the spec allows "an equivalent delta re-encoding", so
    /// this asserts the decoded, semantic result rather than exact bytes).
    #[test]
    fn scenario_e_join_rewrites_second_chunk_relative_to_first() {
        let mut chunk_a = Vec::new();
        encode_vlq(5, &mut chunk_a);
        encode_vlq(0, &mut chunk_a);
        encode_vlq(0, &mut chunk_a);
        encode_vlq(3, &mut chunk_a);
        let chunk_b = chunk_a.clone();

        let chunk_end_state = SourceMapState {
            generated_line: 0,
            generated_column: 5,
            ..Default::default()
        };

        let mut joined = Vec::new();
        let mut prev_end_state = SourceMapState::default();

        append_source_map_chunk(
            &mut joined,
            &mut prev_end_state,
            SourceMapState { source_index: 0, ..Default::default() },
            chunk_end_state,
            &chunk_a,
        );
        append_source_map_chunk(
            &mut joined,
            &mut prev_end_state,
            SourceMapState { source_index: 1, ..Default::default() },
            chunk_end_state,
            &chunk_b,
        );

        // No line boundary was written between the two (no boilerplate
        // emitted), so the whole thing is one generated line.
        assert!(!joined.contains(&b';'));

        let mut absolutes = Vec::new();
        let mut running = SourceMapState::default();
        let mut off = 0;
        while off < joined.len() {
            let (d_col, n1) = decode_vlq(&joined, off).unwrap();
            let (d_src, n2) = decode_vlq(&joined, n1).unwrap();
            let (d_line, n3) = decode_vlq(&joined, n2).unwrap();
            let (d_col2, n4) = decode_vlq(&joined, n3).unwrap();
            running.generated_column += d_col;
            running.source_index += d_src;
            running.original_line += d_line;
            running.original_column += d_col2;
            absolutes.push(running);
            off = if n4 < joined.len() && joined[n4] == b',' { n4 + 1 } else { n4 };
        }

        assert_eq!(absolutes.len(), 2);
        assert_eq!(absolutes[0].generated_column, 5);
        assert_eq!(absolutes[0].source_index, 0);
        assert_eq!(absolutes[0].original_column, 3);

        assert_eq!(absolutes[1].generated_column, 10, "B's column continues after A's");
        assert_eq!(absolutes[1].source_index, 1, "B maps into the second source");
        assert_eq!(absolutes[1].original_line, 0);
        assert_eq!(absolutes[1].original_column, 3);
    }

    #[test]
    fn pending_lines_are_flushed_as_literal_semicolons() {
        let mut chunk = Vec::new();
        encode_vlq(0, &mut chunk);
        encode_vlq(0, &mut chunk);
        encode_vlq(0, &mut chunk);
        encode_vlq(0, &mut chunk);

        let mut joined = Vec::new();
        let mut prev_end_state = SourceMapState {
            generated_line: 3,
            ..Default::default()
        };
        append_source_map_chunk(
            &mut joined,
            &mut prev_end_state,
            SourceMapState::default(),
            SourceMapState { generated_line: 0, generated_column: 0, ..Default::default() },
            &chunk,
        );

        assert_eq!(decode_all(&joined).len(), 4, "3 owed semicolons + the chunk's own line");
    }
}
