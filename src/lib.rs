//! Core logic for the symhuff fixed-width symbol Huffman compressor.

pub mod bitio;
pub mod code;
pub mod codec;
pub mod config;
pub mod container;
pub mod error;
pub mod frequency;
pub mod hash;
pub mod io_utils;
pub mod paths;
pub mod stats;
pub mod symbol;
pub mod tree;

use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Seek, Write};
use std::path::Path;

use tracing::info;

pub use bitio::{BitReader, BitWriter};
pub use code::{Code, CodeTable};
pub use codec::{decode_bits, encode_symbols};
pub use config::Config;
pub use container::{read_header, write_header, ContainerHeader};
pub use error::{Result, SymhuffError};
pub use frequency::FrequencyTable;
pub use hash::{compare_files, file_digest, FileComparison};
pub use paths::{compressed_path, decompressed_path, reconstructed_path};
pub use stats::{CompressReport, DecompressReport, NoopHook, Phase, PhaseHook, PhaseTimings};
pub use symbol::{Symbol, SymbolReader};
pub use tree::{HuffmanTree, Node};

use io_utils::io_error;
use stats::timed;

/// Everything learned from the first pass over a source.
#[derive(Debug, Clone)]
pub struct Model {
    pub symbol_width: usize,
    pub frequencies: FrequencyTable,
    pub tree: HuffmanTree,
    pub codes: CodeTable,
}

impl Model {
    /// Count the symbols of `source` and derive its tree and code table.
    ///
    /// Nothing is written anywhere, so an empty source or a bad width is
    /// reported before any output exists.
    pub fn analyze<R: Read + Seek>(
        source: &mut R,
        config: &Config,
        hook: &mut dyn PhaseHook,
    ) -> Result<Self> {
        config.validate()?;
        let width = config.symbol_width;
        let frequencies = timed(hook, Phase::Frequencies, || {
            FrequencyTable::from_symbols(symbol::extract(source, width)?)
        })?;
        let tree = timed(hook, Phase::TreeBuild, || HuffmanTree::build(&frequencies))?;
        let codes = timed(hook, Phase::CodeTable, || Ok(CodeTable::from_tree(&tree)))?;
        tracing::debug!(
            distinct = frequencies.len(),
            symbols = frequencies.total_symbols(),
            bits = codes.total_bits(),
            "model ready"
        );
        Ok(Self {
            symbol_width: width,
            frequencies,
            tree,
            codes,
        })
    }

    /// Re-read `source` and write the full container to `out`.
    /// Returns the container size in bytes.
    pub fn write_container<R, W>(&self, source: &mut R, out: W, hook: &mut dyn PhaseHook) -> Result<u64>
    where
        R: Read + Seek,
        W: Write,
    {
        let mut out = out;
        let planned = self.codes.total_bits();
        let header_bytes = write_header(&mut out, planned, &self.tree)?;
        let bits = timed(hook, Phase::Encode, || {
            let mut writer = BitWriter::new(out);
            let bits = encode_symbols(symbol::extract(source, self.symbol_width)?, &self.codes, &mut writer)?;
            writer.finish()?;
            Ok(bits)
        })?;
        if bits != planned {
            return Err(SymhuffError::Internal(format!(
                "encoded {bits} bits but the header records {planned}; did the input change?"
            )));
        }
        Ok(header_bytes + bits.div_ceil(8))
    }

    pub fn report(&self, output_bytes: u64) -> CompressReport {
        CompressReport {
            input_bytes: self.frequencies.input_bytes(),
            output_bytes,
            symbol_width: self.symbol_width,
            distinct_symbols: self.frequencies.len(),
            total_symbols: self.frequencies.total_symbols(),
            total_bits: self.codes.total_bits(),
        }
    }
}

/// Compress a seekable source into `out`.
pub fn compress_stream<R, W>(
    source: &mut R,
    out: W,
    config: &Config,
    hook: &mut dyn PhaseHook,
) -> Result<CompressReport>
where
    R: Read + Seek,
    W: Write,
{
    let model = Model::analyze(source, config, hook)?;
    let written = model.write_container(source, out, hook)?;
    Ok(model.report(written))
}

/// Decompress a container from `input` into `out`.
pub fn decompress_stream<R, W>(input: R, out: W, hook: &mut dyn PhaseHook) -> Result<DecompressReport>
where
    R: Read,
    W: Write,
{
    let mut input = input;
    let header = timed(hook, Phase::ReadHeader, || read_header(&mut input))?;
    decode_payload(&header, input, out, hook)
}

fn decode_payload<R, W>(
    header: &ContainerHeader,
    input: R,
    out: W,
    hook: &mut dyn PhaseHook,
) -> Result<DecompressReport>
where
    R: Read,
    W: Write,
{
    let mut reader = BitReader::new(input);
    let mut out = out;
    let written = timed(hook, Phase::Decode, || {
        let n = decode_bits(&mut reader, header.total_bits, &header.tree, &mut out)?;
        out.flush()?;
        Ok(n)
    })?;
    Ok(DecompressReport {
        input_bytes: header.encoded_len() + header.payload_bytes(),
        output_bytes: written,
        total_bits: header.total_bits,
    })
}

/// Compress an in-memory buffer.
pub fn compress(data: &[u8], symbol_width: usize) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    compress_stream(
        &mut Cursor::new(data),
        &mut out,
        &Config::with_symbol_width(symbol_width),
        &mut NoopHook,
    )?;
    Ok(out)
}

/// Decompress an in-memory container.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    decompress_stream(data, &mut out, &mut NoopHook)?;
    Ok(out)
}

fn ensure_distinct(input: &Path, output: &Path) -> Result<()> {
    if let (Ok(a), Ok(b)) = (input.canonicalize(), output.canonicalize()) {
        if a == b {
            return Err(SymhuffError::InvalidArgument(format!(
                "input and output are the same file '{}'",
                input.display()
            )));
        }
    }
    Ok(())
}

/// Compress the file at `input` into a container at `output`.
///
/// The output file is only created once the input has been analysed, so an
/// empty input leaves no container behind. A failure while encoding may
/// leave a partial file that the caller should delete.
pub fn compress_file(
    input: &Path,
    output: &Path,
    config: &Config,
    hook: &mut dyn PhaseHook,
) -> Result<CompressReport> {
    config.validate()?;
    ensure_distinct(input, output)?;
    let file = File::open(input).map_err(|e| io_error("opening", input, e))?;
    let mut source = BufReader::with_capacity(config.buffer_size, file);
    let model = Model::analyze(&mut source, config, hook)?;

    let sink = File::create(output).map_err(|e| io_error("creating", output, e))?;
    let written = model.write_container(
        &mut source,
        BufWriter::with_capacity(config.buffer_size, sink),
        hook,
    )?;
    let report = model.report(written);
    info!(
        input = %input.display(),
        output = %output.display(),
        input_bytes = report.input_bytes,
        output_bytes = report.output_bytes,
        "compressed"
    );
    Ok(report)
}

/// Decompress the container at `input` into `output`.
///
/// The header is validated before `output` is created. A corrupt bitstream
/// may still leave a partial output file.
pub fn decompress_file(
    input: &Path,
    output: &Path,
    config: &Config,
    hook: &mut dyn PhaseHook,
) -> Result<DecompressReport> {
    config.validate()?;
    ensure_distinct(input, output)?;
    let file = File::open(input).map_err(|e| io_error("opening", input, e))?;
    let mut source = BufReader::with_capacity(config.buffer_size, file);
    let header = timed(hook, Phase::ReadHeader, || read_header(&mut source))?;

    let sink = File::create(output).map_err(|e| io_error("creating", output, e))?;
    let report = decode_payload(
        &header,
        source,
        BufWriter::with_capacity(config.buffer_size, sink),
        hook,
    )?;
    info!(
        input = %input.display(),
        output = %output.display(),
        output_bytes = report.output_bytes,
        "decompressed"
    );
    Ok(report)
}
