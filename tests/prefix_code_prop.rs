use quickcheck::{quickcheck, TestResult};
use symhuff::{CodeTable, FrequencyTable, HuffmanTree, SymbolReader};

quickcheck! {
    fn codes_are_prefix_free(data: Vec<u8>, width: u8) -> TestResult {
        let width = (width % 4) as usize + 1;
        if data.is_empty() {
            return TestResult::discard();
        }
        let freqs = FrequencyTable::from_symbols(SymbolReader::new(&data[..], width).unwrap()).unwrap();
        if freqs.len() < 2 {
            return TestResult::discard();
        }
        let codes = CodeTable::from_tree(&HuffmanTree::build(&freqs).unwrap());
        TestResult::from_bool(codes.len() == freqs.len() && codes.is_prefix_free())
    }

    fn every_code_is_non_empty(data: Vec<u8>) -> TestResult {
        if data.is_empty() {
            return TestResult::discard();
        }
        let freqs = FrequencyTable::from_symbols(SymbolReader::new(&data[..], 1).unwrap()).unwrap();
        let codes = CodeTable::from_tree(&HuffmanTree::build(&freqs).unwrap());
        let all_non_empty = codes.iter().all(|(_, code)| !code.is_empty());
        TestResult::from_bool(all_non_empty)
    }

    fn frequencies_sum_to_symbol_count(data: Vec<u8>, width: u8) -> TestResult {
        let width = (width % 8) as usize + 1;
        if data.is_empty() {
            return TestResult::discard();
        }
        let freqs = FrequencyTable::from_symbols(SymbolReader::new(&data[..], width).unwrap()).unwrap();
        let sum: u64 = freqs.iter().map(|(_, n)| n).sum();
        TestResult::from_bool(
            sum == freqs.total_symbols()
                && sum == data.len().div_ceil(width) as u64
                && freqs.input_bytes() == data.len() as u64,
        )
    }
}
