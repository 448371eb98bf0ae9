/*
 * Copyright © 2024, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! Parameter Value Language (PVL) labels as used by ISIS3 cubes, PDS3 products and ISIS3 program
//! output (caminfo etc.). Labels are parsed into a tree of objects/groups with keyword values that
//! can be looked up by dotted, case-insensitive paths such as `IsisCube.Mapping.TargetName`

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::errors::{Result, pvl_error, missing_key};

#[derive(Debug,Clone,PartialEq)]
pub enum PvlValue {
    Scalar { text: String, quoted: bool, units: Option<String> },
    Sequence { items: Vec<PvlValue>, units: Option<String> },
}

impl PvlValue {
    pub fn scalar (text: &str) -> Self {
        PvlValue::Scalar { text: text.to_string(), quoted: false, units: None }
    }

    /// the text of a scalar value, without quotes and units
    pub fn as_str (&self) -> Option<&str> {
        match self {
            PvlValue::Scalar { text, .. } => Some(text.as_str()),
            PvlValue::Sequence { .. } => None
        }
    }

    pub fn as_f64 (&self) -> Option<f64> {
        self.as_str().and_then( |s| s.parse::<f64>().ok())
    }

    pub fn units (&self) -> Option<&str> {
        match self {
            PvlValue::Scalar { units, .. } | PvlValue::Sequence { units, .. } => units.as_deref()
        }
    }

    /// first element of a sequence, or the value itself if it is a scalar
    pub fn first (&self) -> Option<&PvlValue> {
        match self {
            PvlValue::Sequence { items, .. } => items.first(),
            _ => Some(self)
        }
    }

    pub fn items (&self) -> &[PvlValue] {
        match self {
            PvlValue::Sequence { items, .. } => items.as_slice(),
            _ => std::slice::from_ref(self)
        }
    }

    fn set_units (&mut self, u: String) {
        match self {
            PvlValue::Scalar { units, .. } | PvlValue::Sequence { units, .. } => *units = Some(u)
        }
    }
}

/// values are displayed without units
impl fmt::Display for PvlValue {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PvlValue::Scalar { text, .. } => write!( f, "{text}"),
            PvlValue::Sequence { items, .. } => {
                write!( f, "(")?;
                for (i,item) in items.iter().enumerate() {
                    if i > 0 { write!( f, ", ")?; }
                    write!( f, "{item}")?;
                }
                write!( f, ")")
            }
        }
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum BlockKind { Root, Object, Group }

#[derive(Debug,Clone,PartialEq)]
pub struct PvlObject {
    pub name: String,
    pub kind: BlockKind,
    pub entries: Vec<(String,PvlValue)>,
    pub children: Vec<PvlObject>,
}

impl PvlObject {
    pub fn new (name: &str, kind: BlockKind) -> Self {
        PvlObject { name: name.to_string(), kind, entries: Vec::new(), children: Vec::new() }
    }

    /// first child object or group with the given name
    pub fn child (&self, name: &str) -> Option<&PvlObject> {
        self.children.iter().find( |c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn value (&self, key: &str) -> Option<&PvlValue> {
        self.entries.iter().find( |(k,_)| k.eq_ignore_ascii_case(key)).map( |(_,v)| v)
    }

    /// nested object/group, e.g. `block("IsisCube.Mapping")`
    pub fn block (&self, path: &str) -> Option<&PvlObject> {
        path.split('.').try_fold( self, |obj, name| obj.child(name))
    }

    /// keyword value by dotted path, the last path element being the keyword
    pub fn get (&self, path: &str) -> Option<&PvlValue> {
        match path.rsplit_once('.') {
            Some((parent,key)) => self.block(parent).and_then( |obj| obj.value(key)),
            None => self.value(path)
        }
    }

    pub fn get_str (&self, path: &str) -> Result<&str> {
        self.get(path).and_then( |v| v.as_str()).ok_or_else( || missing_key(path))
    }
}

/* #region lexer ******************************************************************************************/

#[derive(Debug,Clone,PartialEq)]
enum Token {
    Word(String),
    Quoted(String),
    Units(String),
    Equals,
    Open(char),
    Close(char),
    Comma,
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    peeked: Option<(usize,Token)>,
}

impl Lexer {
    fn new (text: &str) -> Self {
        Lexer { chars: text.chars().collect(), pos: 0, line: 1, peeked: None }
    }

    fn peek_char (&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump (&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += 1;
        if c == '\n' { self.line += 1 }
        Some(c)
    }

    fn skip_blanks (&mut self) -> Result<()> {
        loop {
            match self.peek_char() {
                Some(c) if c.is_whitespace() => { self.bump(); }
                Some('/') if self.chars.get(self.pos+1) == Some(&'*') => {
                    let start = self.line;
                    self.pos += 2;
                    loop {
                        match self.bump() {
                            Some('*') if self.peek_char() == Some('/') => { self.bump(); break }
                            Some(_) => {}
                            None => return Err( pvl_error( start, "unterminated comment"))
                        }
                    }
                }
                Some('#') => {
                    while let Some(c) = self.peek_char() {
                        if c == '\n' { break }
                        self.bump();
                    }
                }
                _ => return Ok(())
            }
        }
    }

    fn until (&mut self, end: char, line: usize) -> Result<String> {
        let mut s = String::new();
        loop {
            match self.bump() {
                Some(c) if c == end => return Ok(s),
                Some(c) => s.push(c),
                None => return Err( pvl_error( line, format!("missing closing '{end}'")))
            }
        }
    }

    /// line breaks in quoted text and the whitespace around them collapse into a single space
    fn quoted (&mut self, quote: char, line: usize) -> Result<String> {
        let raw = self.until( quote, line)?;
        if !raw.contains('\n') { return Ok(raw) }

        let lines: Vec<&str> = raw.lines().collect();
        let last = lines.len() - 1;
        let parts: Vec<&str> = lines.iter().enumerate()
            .map( |(i,l)| if i == 0 { l.trim_end() } else if i == last { l.trim_start() } else { l.trim() })
            .filter( |l| !l.is_empty())
            .collect();
        Ok( parts.join(" "))
    }

    fn lex (&mut self) -> Result<Option<(usize,Token)>> {
        self.skip_blanks()?;
        let line = self.line;
        let c = match self.bump() {
            Some(c) => c,
            None => return Ok(None)
        };

        let token = match c {
            '=' => Token::Equals,
            '(' | '{' => Token::Open(c),
            ')' | '}' => Token::Close(c),
            ',' => Token::Comma,
            '"' | '\'' => Token::Quoted( self.quoted( c, line)?),
            '<' => Token::Units( self.until( '>', line)?.trim().to_string()),
            _ => {
                let mut word = String::from(c);
                while let Some(c) = self.peek_char() {
                    if c.is_whitespace() || "=(){},<\"".contains(c) { break }
                    word.push(c);
                    self.bump();
                }
                Token::Word(word)
            }
        };
        Ok( Some( (line,token)))
    }

    fn next (&mut self) -> Result<Option<(usize,Token)>> {
        match self.peeked.take() {
            Some(t) => Ok(Some(t)),
            None => self.lex()
        }
    }

    fn peek (&mut self) -> Result<Option<&Token>> {
        if self.peeked.is_none() {
            self.peeked = self.lex()?;
        }
        Ok( self.peeked.as_ref().map( |(_,t)| t))
    }

    fn expect_equals (&mut self, key: &str) -> Result<()> {
        match self.next()? {
            Some((_,Token::Equals)) => Ok(()),
            Some((line,t)) => Err( pvl_error( line, format!("expected '=' after {key}, found {t:?}"))),
            None => Err( pvl_error( self.line, format!("missing value for {key}")))
        }
    }
}

/* #endregion lexer */

/* #region parser *****************************************************************************************/

struct Parser {
    lexer: Lexer,
    done: bool,
}

impl Parser {
    fn value (&mut self) -> Result<PvlValue> {
        let mut value = match self.lexer.next()? {
            Some((_,Token::Word(text))) => PvlValue::Scalar { text, quoted: false, units: None },
            Some((_,Token::Quoted(text))) => PvlValue::Scalar { text, quoted: true, units: None },
            Some((line,Token::Open(open))) => {
                let close = if open == '(' { ')' } else { '}' };
                let mut items = Vec::new();

                let is_empty = self.lexer.peek()? == Some(&Token::Close(close));
                if is_empty {
                    self.lexer.next()?;
                } else {
                    loop {
                        items.push( self.value()?);
                        match self.lexer.next()? {
                            Some((_,Token::Comma)) => continue,
                            Some((_,Token::Close(c))) if c == close => break,
                            Some((line,t)) => return Err( pvl_error( line, format!("unexpected {t:?} in sequence"))),
                            None => return Err( pvl_error( line, "unterminated sequence"))
                        }
                    }
                }
                PvlValue::Sequence { items, units: None }
            }
            Some((line,t)) => return Err( pvl_error( line, format!("unexpected {t:?}"))),
            None => return Err( pvl_error( self.lexer.line, "missing value"))
        };

        let has_units = matches!( self.lexer.peek()?, Some(Token::Units(_)));
        if has_units {
            if let Some((_,Token::Units(u))) = self.lexer.next()? {
                value.set_units(u);
            }
        }
        Ok(value)
    }

    fn block (&mut self, obj: &mut PvlObject) -> Result<()> {
        while let Some((line,token)) = self.lexer.next()? {
            let word = match token {
                Token::Word(word) => word,
                t => return Err( pvl_error( line, format!("unexpected {t:?}")))
            };

            match word.to_ascii_lowercase().as_str() {
                "end" => {
                    self.done = true;
                    return Ok(())
                }
                "end_object" | "end_group" => {
                    if obj.kind == BlockKind::Root {
                        return Err( pvl_error( line, format!("{word} without matching begin")))
                    }
                    let has_name = self.lexer.peek()? == Some(&Token::Equals);
                    if has_name {
                        self.lexer.next()?;
                        self.value()?;
                    }
                    return Ok(())
                }
                kw @ ("object" | "begin_object" | "group" | "begin_group") => {
                    let kind = if kw.ends_with("object") { BlockKind::Object } else { BlockKind::Group };
                    self.lexer.expect_equals(&word)?;
                    let name = self.value()?.to_string();

                    let mut child = PvlObject::new( &name, kind);
                    self.block( &mut child)?;
                    obj.children.push(child);
                    if self.done { return Ok(()) }
                }
                _ => {
                    self.lexer.expect_equals(&word)?;
                    let value = self.value()?;
                    obj.entries.push( (word, value));
                }
            }
        }

        if obj.kind == BlockKind::Root {
            Ok(())
        } else {
            Err( pvl_error( self.lexer.line, format!("missing end of {}", obj.name)))
        }
    }
}

/* #endregion parser */

pub fn parse_pvl (text: &str) -> Result<PvlObject> {
    let mut parser = Parser { lexer: Lexer::new(text), done: false };
    let mut root = PvlObject::new( "ROOT", BlockKind::Root);
    parser.block( &mut root)?;
    Ok(root)
}

/// label text up to and including the first `End` line. Whatever follows (e.g. cube data) is not read
pub fn read_label_text<R: BufRead> (mut reader: R) -> Result<String> {
    let mut text = String::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until( b'\n', &mut buf)? == 0 { break }
        let line = String::from_utf8_lossy(&buf);
        text.push_str(&line);
        if line.trim().eq_ignore_ascii_case("end") { break }
    }
    Ok(text)
}

pub fn read_label (path: &Path) -> Result<PvlObject> {
    let reader = BufReader::new( File::open(path)?);
    parse_pvl( &read_label_text(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUBE_LABEL: &str = r#"Object = IsisCube
  Object = Core
    StartByte   = 65537
    Format      = Tile

    Group = Dimensions
      Samples = 1024
      Lines   = 512
      Bands   = 1
    End_Group
  End_Object

  Group = Archive
    DataSetId          = LRO-L-LOLA-4-GDR-V1.0
    ProductId          = "LDEM_64"
    InstrumentHostName = "Lunar Reconnaissance Orbiter"
    /* a comment */
  End_Group

  Group = Mapping
    ProjectionName     = SimpleCylindrical
    TargetName         = Moon
    EquatorialRadius   = 1737400.0 <meters>
    MinimumLatitude    = -90.0 # trailing comment
    Description        = "first line
                          second line"
    Resolution         = (0.5, 0.25) <degrees/pixel>
  End_Group
End_Object
End
"#;

    #[test]
    fn test_lookup() {
        let label = parse_pvl(CUBE_LABEL).unwrap();
        assert_eq!( label.get_str("IsisCube.Mapping.TargetName").unwrap(), "Moon");
        assert_eq!( label.get_str("isiscube.mapping.targetname").unwrap(), "Moon");
        assert_eq!( label.get_str("IsisCube.Archive.ProductId").unwrap(), "LDEM_64");
        assert_eq!( label.get_str("IsisCube.Archive.DataSetId").unwrap(), "LRO-L-LOLA-4-GDR-V1.0");
        assert_eq!( label.get("IsisCube.Core.Dimensions.Samples").and_then( |v| v.as_f64()), Some(1024.0));
        assert!( label.get_str("IsisCube.Archive.InstrumentId").is_err());

        let radius = label.get("IsisCube.Mapping.EquatorialRadius").unwrap();
        assert_eq!( radius.as_str(), Some("1737400.0"));
        assert_eq!( radius.units(), Some("meters"));
        assert_eq!( label.get_str("IsisCube.Mapping.MinimumLatitude").unwrap(), "-90.0");
        assert_eq!( label.get_str("IsisCube.Mapping.Description").unwrap(), "first line second line");

        let res = label.get("IsisCube.Mapping.Resolution").unwrap();
        assert_eq!( res.items().len(), 2);
        assert_eq!( res.first().and_then( |v| v.as_str()), Some("0.5"));
        assert_eq!( res.to_string(), "(0.5, 0.25)");
    }

    #[test]
    fn test_end_of_label() {
        let text = "Object = A\n  X = 1\nEnd_Object\nEnd\n\u{1}\u{2} binary";
        let label = parse_pvl( &read_label_text( text.as_bytes()).unwrap()).unwrap();
        assert_eq!( label.get_str("A.X").unwrap(), "1");
    }

    #[test]
    fn test_pds3_values() {
        let label = parse_pvl("PDS_VERSION_ID = PDS3\n^IMAGE = \"x.img\"\nSAMPLE_BIT_MASK = 2#11111111#\nEND\n").unwrap();
        assert_eq!( label.get_str("^IMAGE").unwrap(), "x.img");
        assert_eq!( label.get_str("SAMPLE_BIT_MASK").unwrap(), "2#11111111#");
    }

    #[test]
    fn test_syntax_errors() {
        assert!( parse_pvl("Object = A\n X = 1\n").is_err());
        assert!( parse_pvl("X = (1, 2\nEnd\n").is_err());
        assert!( parse_pvl("End_Group\n").is_err());
    }
}
