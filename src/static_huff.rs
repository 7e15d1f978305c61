//! Static Huffman Coding
//!
//! The whole input is counted before anything is encoded, so there is a single
//! tree for the whole stream (contrast with adaptive schemes where the tree is
//! updated as symbols go by).
//!
//! * `count_frequencies` -> `build_tree` -> `generate_codes` -> `encode`
//! * `decode` needs only the tree, the code table is redundant with it
//! * `StaticHuffman` owns the tree and the code table for one input
//!
//! Ties between equal weights are broken so that the tree is reproducible:
//! branches before leaves, older branches before newer ones, and smaller symbols
//! before larger ones.

use bit_vec::BitVec;
use std::cmp::Ordering;
use std::collections::{BinaryHeap,BTreeMap};
use std::io::{Cursor,Read,Write,Seek,SeekFrom};
use crate::tools::node_pool::{Node,NodePool};
use crate::tools::{bit_text,code_listing};
use crate::{DecodeError,Error,Options,DYNERR};

/// Count of each byte value in the input
#[derive(Clone,Debug,PartialEq)]
pub struct FrequencyTable {
    counts: [u64;256]
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self { counts: [0;256] }
    }
    pub fn get(&self,symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }
    /// number of distinct symbols
    pub fn len(&self) -> usize {
        self.counts.iter().filter(|c| **c > 0).count()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// (symbol,count) for every symbol that occurs, ascending by symbol
    pub fn iter(&self) -> impl Iterator<Item = (u8,u64)> + '_ {
        self.counts.iter().enumerate().filter(|(_,c)| **c > 0).map(|(s,c)| (s as u8,*c))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

pub fn count_frequencies(dat: &[u8]) -> FrequencyTable {
    let mut ans = FrequencyTable::new();
    for c in dat {
        ans.counts[*c as usize] += 1;
    }
    ans
}

/// Map from symbols to their codes
#[derive(Clone,Debug,PartialEq,Default)]
pub struct CodeTable {
    codes: BTreeMap<u8,BitVec>
}

impl CodeTable {
    pub fn new() -> Self {
        Self { codes: BTreeMap::new() }
    }
    pub fn get(&self,symbol: u8) -> Option<&BitVec> {
        self.codes.get(&symbol)
    }
    pub fn insert(&mut self,symbol: u8,code: BitVec) {
        self.codes.insert(symbol,code);
    }
    pub fn len(&self) -> usize {
        self.codes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
    /// (symbol,code) ascending by symbol
    pub fn iter(&self) -> impl Iterator<Item = (u8,&BitVec)> + '_ {
        self.codes.iter().map(|(s,c)| (*s,c))
    }
}

/// Secondary key for equal weights, variant order matters: branches sort first.
#[derive(Debug,PartialEq,Eq,PartialOrd,Ord)]
enum Rank {
    /// creation sequence of the branch
    Branch(usize),
    Leaf(u8)
}

/// Node waiting in the heap
#[derive(Debug,PartialEq,Eq)]
struct Pending {
    weight: u64,
    rank: Rank,
    idx: usize
}

impl Ord for Pending {
    fn cmp(&self,other: &Self) -> Ordering {
        // BinaryHeap pops the greatest, we want the lightest
        (other.weight,&other.rank).cmp(&(self.weight,&self.rank))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self,other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Immutable code tree.  The root is always a branch, when there is only one
/// symbol the root has a single son on the 0 side, and every bit decodes to it.
#[derive(Clone,Debug,PartialEq)]
pub struct HuffTree {
    pool: NodePool,
    root: usize
}

impl HuffTree {
    pub fn root(&self) -> usize {
        self.root
    }
    pub fn node(&self,idx: usize) -> &Node {
        self.pool.get(idx)
    }
    /// Follow the son selected by `bit`
    pub fn down(&self,idx: usize,bit: bool) -> Option<usize> {
        self.pool.down(idx,bit)
    }
    pub fn node_count(&self) -> usize {
        self.pool.len()
    }
    /// The symbol of a single symbol tree, i.e., the root has only a 0 son and it is a leaf
    fn lone_symbol(&self) -> Option<u8> {
        match self.pool.get(self.root) {
            Node::Branch { down: [Some(son),None], .. } => match self.pool.get(*son) {
                Node::Leaf { symbol, .. } => Some(*symbol),
                Node::Branch { .. } => None
            },
            _ => None
        }
    }
    /// Walk the tree with an explicit stack, very lopsided trees are normal
    /// when one symbol dominates.
    pub fn codes(&self) -> CodeTable {
        let mut table = CodeTable::new();
        let mut stack: Vec<(usize,BitVec)> = vec![(self.root,BitVec::new())];
        while let Some((idx,path)) = stack.pop() {
            match self.pool.get(idx) {
                Node::Leaf { symbol, .. } => {
                    log::trace!("code for {:#04x} has {} bits",symbol,path.len());
                    table.insert(*symbol,path);
                },
                Node::Branch { down, .. } => {
                    for (bit,son) in down.iter().enumerate().rev() {
                        if let Some(son) = son {
                            let mut next = path.clone();
                            next.push(bit == 1);
                            stack.push((*son,next));
                        }
                    }
                }
            }
        }
        table
    }
    /// Grow a decoding tree from a code table, such as one read back from a listing.
    /// Weights are unknown and left at 0.  Fails if the table is empty, if any code
    /// is empty, or if a code is a prefix of another.
    pub fn from_codes(table: &CodeTable) -> Result<Self,Error> {
        if table.is_empty() {
            return Err(Error::EmptyInput);
        }
        let mut pool = NodePool::with_capacity(2*table.len());
        let root = pool.spawn_empty_branch();
        for (symbol,code) in table.iter() {
            let last = match code.len() {
                0 => return Err(Error::CodeCollision(symbol)),
                l => l - 1
            };
            let mut curs = root;
            for bit in code.iter().take(last) {
                curs = match pool.down(curs,bit) {
                    Some(son) => match pool.get(son) {
                        Node::Leaf { .. } => return Err(Error::CodeCollision(symbol)),
                        Node::Branch { .. } => son
                    },
                    None => {
                        let son = pool.spawn_empty_branch();
                        pool.attach(curs,bit,son);
                        son
                    }
                };
            }
            let bit = code[last];
            if pool.down(curs,bit).is_some() {
                return Err(Error::CodeCollision(symbol));
            }
            let leaf = pool.spawn_leaf(symbol,0);
            pool.attach(curs,bit,leaf);
        }
        log::debug!("tree with {} nodes grown from {} codes",pool.len(),table.len());
        Ok(Self { pool, root })
    }
}

/// Build the tree by repeatedly merging the two lightest nodes.
/// Returns `None` if there are no symbols.
pub fn build_tree(freq: &FrequencyTable) -> Option<HuffTree> {
    let n = freq.len();
    if n == 0 {
        log::debug!("no symbols, no tree");
        return None;
    }
    let mut pool = NodePool::with_capacity(2*n);
    let mut heap = BinaryHeap::with_capacity(n);
    for (symbol,weight) in freq.iter() {
        let idx = pool.spawn_leaf(symbol,weight);
        heap.push(Pending { weight, rank: Rank::Leaf(symbol), idx });
    }
    if n == 1 {
        // no merge is possible, put the lone leaf on the 0 side of a new root
        let leaf = heap.pop()?.idx;
        let root = pool.spawn_branch(leaf,None);
        log::debug!("single symbol tree");
        return Some(HuffTree { pool, root });
    }
    let mut branches: usize = 0;
    loop {
        let a = heap.pop()?;
        let b = match heap.pop() {
            Some(b) => b,
            None => {
                log::debug!("tree has {} leaves and {} branches",n,branches);
                return Some(HuffTree { pool, root: a.idx });
            }
        };
        let idx = pool.spawn_branch(a.idx,Some(b.idx));
        log::trace!("merge {} + {}",a.weight,b.weight);
        heap.push(Pending { weight: a.weight + b.weight, rank: Rank::Branch(branches), idx });
        branches += 1;
    }
}

/// Same as `build_tree`, but an empty table is an error
pub fn build_tree_required(freq: &FrequencyTable) -> Result<HuffTree,Error> {
    build_tree(freq).ok_or(Error::EmptyInput)
}

/// Code table for the tree, empty if there is no tree
pub fn generate_codes(tree: Option<&HuffTree>) -> CodeTable {
    match tree {
        Some(tree) => tree.codes(),
        None => CodeTable::new()
    }
}

pub fn encode(dat: &[u8],table: &CodeTable) -> Result<BitVec,Error> {
    let mut ans = BitVec::new();
    for c in dat {
        match table.get(*c) {
            Some(code) => ans.extend(code.iter()),
            None => {
                log::error!("no code for {:#04x}",c);
                return Err(Error::Encoding(*c));
            }
        }
    }
    log::debug!("encoded {} symbols into {} bits",dat.len(),ans.len());
    Ok(ans)
}

/// Walk the tree bit by bit, emitting a symbol at every leaf.
/// The walk has to finish back at the root, otherwise the stream was cut short.
pub fn decode(bits: &BitVec,tree: Option<&HuffTree>) -> Result<Vec<u8>,Error> {
    let tree = match tree {
        Some(tree) => tree,
        None if bits.is_empty() => return Ok(Vec::new()),
        None => return Err(DecodeError::NoTree { bits: bits.len() }.into())
    };
    if let Some(symbol) = tree.lone_symbol() {
        // one symbol, each bit is a whole code whatever its value
        log::debug!("single symbol tree, {} bits decode to {:#04x}",bits.len(),symbol);
        return Ok(vec![symbol;bits.len()]);
    }
    let mut ans = Vec::new();
    let mut curs = tree.root;
    for (i,bit) in bits.iter().enumerate() {
        curs = match tree.pool.down(curs,bit) {
            Some(son) => son,
            None => {
                log::error!("bit {} leads nowhere",i);
                return Err(DecodeError::InvalidPath { bit: i }.into());
            }
        };
        if let Node::Leaf { symbol, .. } = tree.pool.get(curs) {
            ans.push(*symbol);
            curs = tree.root;
        }
    }
    if curs != tree.root {
        log::error!("stream ended inside a code");
        return Err(DecodeError::Truncated { bits: bits.len() }.into());
    }
    log::debug!("decoded {} bits into {} symbols",bits.len(),ans.len());
    Ok(ans)
}

/// Holds everything derived from one input.  Encoding and decoding borrow the tree.
#[derive(Clone,Debug)]
pub struct StaticHuffman {
    tree: Option<HuffTree>,
    codes: CodeTable
}

impl StaticHuffman {
    /// Count `dat` and build the tree and codes for it
    pub fn create(dat: &[u8]) -> Self {
        let freq = count_frequencies(dat);
        log::debug!("{} distinct symbols in {} bytes",freq.len(),dat.len());
        let tree = build_tree(&freq);
        let codes = generate_codes(tree.as_ref());
        Self { tree, codes }
    }
    /// Rebuild from a persisted code listing, an empty listing means empty input
    pub fn from_listing(listing: &[u8]) -> Result<Self,Error> {
        let codes = code_listing::read(listing)?;
        let tree = match codes.is_empty() {
            true => None,
            false => Some(HuffTree::from_codes(&codes)?)
        };
        Ok(Self { tree, codes })
    }
    pub fn tree(&self) -> Option<&HuffTree> {
        self.tree.as_ref()
    }
    pub fn codes(&self) -> &CodeTable {
        &self.codes
    }
    pub fn encode(&self,dat: &[u8]) -> Result<BitVec,Error> {
        encode(dat,&self.codes)
    }
    pub fn decode(&self,bits: &BitVec) -> Result<Vec<u8>,Error> {
        decode(bits,self.tree.as_ref())
    }
}

/// Main compression function.
/// `expanded_in` is an object with `Read` and `Seek` traits, usually `std::fs::File`, or `std::io::Cursor<&[u8]>`.
/// The bit stream goes to `compressed_out` and the code listing goes to `codes_out`.
/// Returns (in_size,out_size) or error.
pub fn compress<R,W,C>(expanded_in: &mut R, compressed_out: &mut W, codes_out: &mut C, opt: &Options) -> Result<(u64,u64),DYNERR>
where R: Read + Seek, W: Write, C: Write {
    let expanded_length = expanded_in.seek(SeekFrom::End(0))?;
    if expanded_length > opt.max_file_size {
        return Err(Box::new(Error::FileTooLarge));
    }
    expanded_in.seek(SeekFrom::Start(0))?;
    let mut dat = Vec::new();
    expanded_in.read_to_end(&mut dat)?;
    let huff = StaticHuffman::create(&dat);
    if opt.require_tree && huff.tree().is_none() {
        return Err(Box::new(Error::EmptyInput));
    }
    // nothing is written until both the listing and the stream are ready
    let listing = code_listing::write(huff.codes());
    let bits = huff.encode(&dat)?;
    let stream = bit_text::write(&bits,opt.format)?;
    codes_out.write_all(&listing)?;
    codes_out.flush()?;
    compressed_out.write_all(&stream)?;
    compressed_out.flush()?;
    Ok((expanded_length,stream.len() as u64))
}

/// Main decompression function.
/// `compressed_in` is an object with `Read` and `Seek` traits, usually `std::fs::File`, or `std::io::Cursor<&[u8]>`.
/// The tree is grown from the listing in `codes_in`.
/// The size limit applies to the expanded data, as it does for `compress`,
/// since the stream can be several times larger than the data it holds.
/// Returns (in_size,out_size) or error.
pub fn expand<R,C,W>(compressed_in: &mut R, codes_in: &mut C, expanded_out: &mut W, opt: &Options) -> Result<(u64,u64),DYNERR>
where R: Read + Seek, C: Read, W: Write {
    let compressed_size = compressed_in.seek(SeekFrom::End(0))?;
    compressed_in.seek(SeekFrom::Start(0))?;
    let mut buf = Vec::new();
    compressed_in.read_to_end(&mut buf)?;
    let mut listing = Vec::new();
    codes_in.read_to_end(&mut listing)?;
    let huff = StaticHuffman::from_listing(&listing)?;
    if opt.require_tree && huff.tree().is_none() {
        return Err(Box::new(Error::EmptyInput));
    }
    let bits = bit_text::read(&buf,opt.format)?;
    let dat = huff.decode(&bits)?;
    if dat.len() as u64 > opt.max_file_size {
        log::error!("expanded data has {} bytes",dat.len());
        return Err(Box::new(Error::FileTooLarge));
    }
    expanded_out.write_all(&dat)?;
    expanded_out.flush()?;
    Ok((compressed_size,dat.len() as u64))
}

/// Convenience function, calls `compress` with a slice, returns (stream,listing)
pub fn compress_slice(slice: &[u8],opt: &Options) -> Result<(Vec<u8>,Vec<u8>),DYNERR> {
    let mut src = Cursor::new(slice);
    let mut stream: Vec<u8> = Vec::new();
    let mut listing: Vec<u8> = Vec::new();
    compress(&mut src,&mut stream,&mut listing,opt)?;
    Ok((stream,listing))
}

/// Convenience function, calls `expand` with a stream and listing, returning a Vec
pub fn expand_slice(stream: &[u8],listing: &[u8],opt: &Options) -> Result<Vec<u8>,DYNERR> {
    let mut src = Cursor::new(stream);
    let mut codes = Cursor::new(listing);
    let mut ans: Vec<u8> = Vec::new();
    expand(&mut src,&mut codes,&mut ans,opt)?;
    Ok(ans)
}

// *************** TESTS *****************

#[cfg(test)]
fn bits(s: &str) -> BitVec {
    bit_text::from_text(s.as_bytes()).expect("bad test bits")
}

#[cfg(test)]
fn is_prefix(a: &BitVec,b: &BitVec) -> bool {
    a.len() <= b.len() && a.iter().zip(b.iter()).all(|(x,y)| x==y)
}

#[test]
fn counting() {
    let freq = count_frequencies("abracadabra".as_bytes());
    assert_eq!(freq.len(),5);
    assert_eq!(freq.get(b'a'),5);
    assert_eq!(freq.get(b'b'),2);
    assert_eq!(freq.get(b'r'),2);
    assert_eq!(freq.get(b'c'),1);
    assert_eq!(freq.get(b'd'),1);
    assert_eq!(freq.get(b'z'),0);
    assert_eq!(freq.iter().map(|(s,_)| s).collect::<Vec<u8>>(),"abcdr".as_bytes().to_vec());
}

#[test]
fn empty_input() {
    let freq = count_frequencies(&[]);
    assert!(freq.is_empty());
    assert!(build_tree(&freq).is_none());
    assert_eq!(build_tree_required(&freq),Err(Error::EmptyInput));
    let table = generate_codes(None);
    assert!(table.is_empty());
    assert!(encode(&[],&table).expect("encoding failed").is_empty());
    assert_eq!(decode(&BitVec::new(),None).expect("decoding failed"),Vec::<u8>::new());
    assert_eq!(decode(&bits("0"),None),Err(Error::Decoding(DecodeError::NoTree { bits: 1 })));
}

#[test]
fn single_symbol() {
    let huff = StaticHuffman::create("aaaa".as_bytes());
    assert_eq!(huff.codes().len(),1);
    assert_eq!(huff.codes().get(b'a'),Some(&bits("0")));
    let encoded = huff.encode("aaaa".as_bytes()).expect("encoding failed");
    assert_eq!(encoded,bits("0000"));
    assert_eq!(huff.decode(&encoded).expect("decoding failed"),"aaaa".as_bytes().to_vec());
    assert_eq!(huff.decode(&bits("001")).expect("decoding failed"),"aaa".as_bytes().to_vec());
    assert_eq!(huff.decode(&bits("0101")).expect("decoding failed"),"aaaa".as_bytes().to_vec());
    assert!(huff.decode(&BitVec::new()).expect("decoding failed").is_empty());
}

#[test]
fn abracadabra() {
    let test_data = "abracadabra".as_bytes();
    let huff = StaticHuffman::create(test_data);
    let codes = huff.codes();
    assert_eq!(codes.get(b'a'),Some(&bits("0")));
    assert_eq!(codes.get(b'r'),Some(&bits("10")));
    assert_eq!(codes.get(b'b'),Some(&bits("111")));
    assert_eq!(codes.get(b'c'),Some(&bits("1100")));
    assert_eq!(codes.get(b'd'),Some(&bits("1101")));
    let encoded = huff.encode(test_data).expect("encoding failed");
    assert_eq!(encoded,bits("01111001100011010111100"));
    assert_eq!(huff.decode(&encoded).expect("decoding failed"),test_data.to_vec());
}

#[test]
fn invertibility() {
    let mut all_bytes: Vec<u8> = (0..=255).collect();
    all_bytes.extend_from_slice("I am Sam. Sam I am. I do not like this Sam I am.\n".as_bytes());
    let cases: Vec<&[u8]> = vec![
        "I am Sam. Sam I am. I do not like this Sam I am.\n".as_bytes(),
        "ab".as_bytes(),
        "TOBEORNOTTOBEORTOBEORNOT#\n".as_bytes(),
        &[0u8,0,0,255,255,1][..],
        all_bytes.as_slice()
    ];
    for test_data in cases {
        let huff = StaticHuffman::create(test_data);
        let encoded = huff.encode(test_data).expect("encoding failed");
        let decoded = huff.decode(&encoded).expect("decoding failed");
        assert_eq!(test_data.to_vec(),decoded);
    }
}

#[test]
fn flat_distribution() {
    let test_data: Vec<u8> = (0..=255).collect();
    let huff = StaticHuffman::create(&test_data);
    for (_,code) in huff.codes().iter() {
        assert_eq!(code.len(),8);
    }
}

#[test]
fn prefix_free() {
    let test_data = "it was the best of times, it was the worst of times".as_bytes();
    let table = StaticHuffman::create(test_data).codes().clone();
    for (s1,c1) in table.iter() {
        assert!(!c1.is_empty());
        for (s2,c2) in table.iter() {
            if s1 != s2 {
                assert!(!is_prefix(c1,c2),"{} is a prefix of {}",s1,s2);
            }
        }
    }
}

#[test]
fn code_length_monotonic() {
    // lopsided counts, 1,2,4,8,... so that the tree is a long chain
    let mut test_data = Vec::new();
    for i in 0..12u8 {
        for _j in 0..(1usize << i) {
            test_data.push(b'a' + i);
        }
    }
    test_data.extend_from_slice("the quick brown fox jumps over the lazy dog".as_bytes());
    let freq = count_frequencies(&test_data);
    let table = generate_codes(build_tree(&freq).as_ref());
    for (s1,c1) in table.iter() {
        for (s2,c2) in table.iter() {
            if freq.get(s1) > freq.get(s2) {
                assert!(c1.len() <= c2.len());
            }
        }
    }
}

#[test]
fn deterministic() {
    let freq = count_frequencies("mississippi river banks".as_bytes());
    let first = build_tree(&freq).expect("no tree");
    for _i in 0..10 {
        assert_eq!(build_tree(&freq).expect("no tree"),first);
    }
}

#[test]
fn equal_weights_prefer_branches() {
    // after c+d merge into a branch of weight 2, that branch is taken ahead of leaf b
    let freq = count_frequencies("abracadabra".as_bytes());
    let tree = build_tree(&freq).expect("no tree");
    let right = tree.down(tree.root(),true).expect("missing son");
    let deep = tree.down(right,true).expect("missing son");
    let branch = tree.down(deep,false).expect("missing son");
    assert!(matches!(tree.node(branch),Node::Branch { weight: 2, .. }));
    assert_eq!(tree.node(tree.root()).weight(),11);
}

#[test]
fn truncation() {
    let huff = StaticHuffman::create("abracadabra".as_bytes());
    let encoded = huff.encode("abracadabra".as_bytes()).expect("encoding failed");
    let boundaries = [0,1,4,6,7,11,12,16,17,20,22,23];
    for len in 0..encoded.len() {
        let mut short = encoded.clone();
        short.truncate(len);
        match huff.decode(&short) {
            Ok(dat) => {
                assert!(boundaries.contains(&len));
                assert!("abracadabra".as_bytes().starts_with(&dat));
            },
            Err(e) => {
                assert!(!boundaries.contains(&len));
                assert_eq!(e,Error::Decoding(DecodeError::Truncated { bits: len }));
            }
        }
    }
}

#[test]
fn missing_code() {
    let huff = StaticHuffman::create("abc".as_bytes());
    assert_eq!(huff.encode("abcd".as_bytes()),Err(Error::Encoding(b'd')));
}

#[test]
fn tree_from_listing() {
    let test_data = "she sells sea shells by the sea shore".as_bytes();
    let huff = StaticHuffman::create(test_data);
    let encoded = huff.encode(test_data).expect("encoding failed");
    let rebuilt = StaticHuffman::from_listing(&code_listing::write(huff.codes())).expect("bad listing");
    assert_eq!(rebuilt.codes(),huff.codes());
    assert_eq!(rebuilt.decode(&encoded).expect("decoding failed"),test_data.to_vec());
    let lone = StaticHuffman::from_listing(b"a: 0\n").expect("bad listing");
    assert_eq!(lone.decode(&bits("000")).expect("decoding failed"),"aaa".as_bytes().to_vec());
    assert!(StaticHuffman::from_listing(&[]).expect("bad listing").tree().is_none());
}

#[test]
fn colliding_codes() {
    assert_eq!(StaticHuffman::from_listing(b"a: 0\nb: 01\n").err(),Some(Error::CodeCollision(b'b')));
    assert_eq!(StaticHuffman::from_listing(b"a: 01\nb: 0\n").err(),Some(Error::CodeCollision(b'b')));
    assert_eq!(StaticHuffman::from_listing(b"a: 10\nb: 10\n").err(),Some(Error::CodeCollision(b'b')));
}

#[test]
fn shared_tree() {
    let test_data = "I am Sam. Sam I am. I do not like this Sam I am.\n".as_bytes();
    let huff = StaticHuffman::create(test_data);
    let encoded = huff.encode(test_data).expect("encoding failed");
    std::thread::scope(|scope| {
        for _i in 0..4 {
            scope.spawn(|| {
                assert_eq!(huff.decode(&encoded).expect("decoding failed"),test_data.to_vec());
                assert_eq!(huff.encode(test_data).expect("encoding failed"),encoded);
            });
        }
    });
}

#[test]
fn slices_text_format() {
    let test_data = "abracadabra".as_bytes();
    let (stream,listing) = compress_slice(test_data,&crate::STD_OPTIONS).expect("compression failed");
    assert_eq!(stream,"01111001100011010111100".as_bytes().to_vec());
    assert_eq!(listing,"a: 0\nb: 111\nc: 1100\nd: 1101\nr: 10\n".as_bytes().to_vec());
    let expanded = expand_slice(&stream,&listing,&crate::STD_OPTIONS).expect("expansion failed");
    assert_eq!(expanded,test_data.to_vec());
}

#[test]
fn slices_packed_format() {
    let mut opt = crate::STD_OPTIONS;
    opt.format = crate::BitFormat::Packed;
    let test_data = "abracadabra".as_bytes();
    let (stream,listing) = compress_slice(test_data,&opt).expect("compression failed");
    assert_eq!(stream,hex::decode("17000000798D78").unwrap());
    let expanded = expand_slice(&stream,&listing,&opt).expect("expansion failed");
    assert_eq!(expanded,test_data.to_vec());
}

#[test]
fn slices_empty() {
    let (stream,listing) = compress_slice(&[],&crate::STD_OPTIONS).expect("compression failed");
    assert!(stream.is_empty());
    assert!(listing.is_empty());
    assert!(expand_slice(&stream,&listing,&crate::STD_OPTIONS).expect("expansion failed").is_empty());
    let mut opt = crate::STD_OPTIONS;
    opt.require_tree = true;
    assert!(compress_slice(&[],&opt).is_err());
}

#[test]
fn size_limit() {
    let mut opt = crate::STD_OPTIONS;
    opt.max_file_size = 4;
    match compress_slice("abracadabra".as_bytes(),&opt) {
        Err(e) => assert_eq!(e.downcast_ref::<Error>(),Some(&Error::FileTooLarge)),
        Ok(_) => panic!("limit was not enforced")
    }
}

#[test]
fn size_limit_both_ways() {
    // the text stream is 23 bytes, but only the 11 expanded bytes count
    let mut opt = crate::STD_OPTIONS;
    opt.max_file_size = 11;
    let test_data = "abracadabra".as_bytes();
    let (stream,listing) = compress_slice(test_data,&opt).expect("compression failed");
    assert_eq!(stream.len(),23);
    let expanded = expand_slice(&stream,&listing,&opt).expect("expansion failed");
    assert_eq!(expanded,test_data.to_vec());
    opt.max_file_size = 10;
    match expand_slice(&stream,&listing,&opt) {
        Err(e) => assert_eq!(e.downcast_ref::<Error>(),Some(&Error::FileTooLarge)),
        Ok(_) => panic!("limit was not enforced")
    }
}

#[test]
fn nothing_written_on_failure() {
    let mut opt = crate::STD_OPTIONS;
    opt.max_file_size = 4;
    let mut stream: Vec<u8> = Vec::new();
    let mut listing: Vec<u8> = Vec::new();
    let mut src = Cursor::new("abracadabra".as_bytes());
    assert!(compress(&mut src,&mut stream,&mut listing,&opt).is_err());
    assert!(stream.is_empty());
    assert!(listing.is_empty());
    opt = crate::STD_OPTIONS;
    opt.require_tree = true;
    let mut src = Cursor::new("".as_bytes());
    assert!(compress(&mut src,&mut stream,&mut listing,&opt).is_err());
    assert!(stream.is_empty());
    assert!(listing.is_empty());
}
