//! 答题卡表格读写
//!
//! 第一行为表头，其余为数据行；所有单元格统一按文本读取。

use calamine::{Data, Range, Reader, Xlsx, open_workbook_auto_from_rs};
use rust_xlsxwriter::{Format, Workbook};
use std::io::Cursor;

use crate::errors::{GraderError, Result};

use super::file_name::lowercase_extension;

/// 解析后的答题卡
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerSheet {
    pub header: Vec<String>,
    /// 表头宽度
    pub column_count: usize,
    /// 数据行，每行补齐到 `column_count` 列
    pub rows: Vec<Vec<String>>,
}

impl AnswerSheet {
    fn from_rows(header: Vec<String>, rows: impl IntoIterator<Item = Vec<String>>) -> Self {
        let header_width = header.len();
        let rows = rows
            .into_iter()
            // 整行为空的行不计入
            .filter(|row| row.iter().any(|c| !c.trim().is_empty()))
            .map(|mut row| {
                if row.len() < header_width {
                    row.resize(header_width, String::new());
                }
                row
            })
            .collect();
        Self {
            header,
            column_count: header_width,
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.column_count == 0
    }
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => {
            // 整数值的浮点数不带小数部分
            if f.fract() == 0.0 {
                format!("{:.0}", f)
            } else {
                format!("{}", f)
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => {
            if *b {
                "TRUE".to_string()
            } else {
                "FALSE".to_string()
            }
        }
        Data::Error(e) => format!("#ERROR: {:?}", e),
        Data::DateTime(dt) => dt.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

fn sheet_from_range(range: &Range<Data>) -> AnswerSheet {
    let mut rows_iter = range.rows();
    let Some(header) = rows_iter.next() else {
        return AnswerSheet::default();
    };

    AnswerSheet::from_rows(
        header.iter().map(cell_to_string).collect(),
        rows_iter.map(|row| row.iter().map(cell_to_string).collect()),
    )
}

/// 读取 xlsx 第一个工作表
pub fn parse_xlsx(data: &[u8]) -> Result<AnswerSheet> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(data))
        .map_err(|e| GraderError::spreadsheet(format!("打开 XLSX 失败: {e}")))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let sheet_name = sheet_names
        .first()
        .ok_or_else(|| GraderError::spreadsheet("工作簿中没有工作表"))?;

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| GraderError::spreadsheet(format!("读取工作表失败: {e}")))?;

    Ok(sheet_from_range(&range))
}

/// 按内容识别 xls / xlsx 等工作簿格式，读取第一个工作表
pub fn parse_workbook(data: &[u8]) -> Result<AnswerSheet> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(data))
        .map_err(|e| GraderError::spreadsheet(format!("打开工作簿失败: {e}")))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let sheet_name = sheet_names
        .first()
        .ok_or_else(|| GraderError::spreadsheet("工作簿中没有工作表"))?;

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| GraderError::spreadsheet(format!("读取工作表失败: {e}")))?;

    Ok(sheet_from_range(&range))
}

/// 读取 CSV（允许带 BOM）
pub fn parse_csv(data: &[u8]) -> Result<AnswerSheet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(Cursor::new(data));

    let header: Vec<String> = rdr
        .headers()
        .map_err(|e| GraderError::spreadsheet(format!("读取表头失败: {e}")))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for (row_num, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| {
            GraderError::spreadsheet(format!("第 {} 行解析失败: {e}", row_num + 2))
        })?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    Ok(AnswerSheet::from_rows(header, rows))
}

/// 按扩展名选择解析方式
pub fn parse_sheet(file_name: &str, data: &[u8]) -> Result<AnswerSheet> {
    match lowercase_extension(file_name).as_str() {
        ".xlsx" => parse_xlsx(data),
        ".csv" => parse_csv(data),
        ext => Err(GraderError::validation(format!(
            "文件 '{file_name}' 类型不支持: '{ext}'，仅支持 .xlsx 和 .csv"
        ))),
    }
}

/// 生成带 UTF-8 BOM 的 CSV
pub fn write_csv_with_bom<I, R>(header: &[&str], rows: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = String>,
{
    let mut buffer = "\u{FEFF}".as_bytes().to_vec();
    {
        let mut wtr = csv::Writer::from_writer(&mut buffer);
        wtr.write_record(header)?;
        for row in rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
    }
    Ok(buffer)
}

/// 答题卡模板种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// 标准答案（含分值列）
    Standard,
    /// 学生答题卡
    Answer,
}

impl TemplateKind {
    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "standard" => Some(TemplateKind::Standard),
            "answer" => Some(TemplateKind::Answer),
            _ => None,
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            TemplateKind::Standard => "班别_admin.xlsx",
            TemplateKind::Answer => "班别_姓名.xlsx",
        }
    }
}

/// 生成答题卡模板
pub fn build_template(kind: TemplateKind) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let header_format = Format::new().set_bold();

    let headers: &[&str] = match kind {
        TemplateKind::Standard => &["序号", "题目", "答案", "分值"],
        TemplateKind::Answer => &["序号", "题目", "答案"],
    };
    let example: &[&str] = match kind {
        TemplateKind::Standard => &["1", "列出当前目录下的全部文件", "ls -a", "5"],
        TemplateKind::Answer => &["1", "列出当前目录下的全部文件", ""],
    };

    let xlsx_err =
        |e: rust_xlsxwriter::XlsxError| GraderError::spreadsheet(format!("XLSX 写入失败: {e}"));
    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(xlsx_err)?;
    }
    for (col, value) in example.iter().enumerate() {
        if value.is_empty() {
            continue;
        }
        worksheet.write_string(1, col as u16, *value).map_err(xlsx_err)?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| GraderError::spreadsheet(format!("XLSX 生成失败: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xlsx_bytes(rows: &[&[&str]]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                if let Ok(n) = value.parse::<f64>() {
                    worksheet.write_number(r as u32, c as u16, n).unwrap();
                } else if !value.is_empty() {
                    worksheet.write_string(r as u32, c as u16, *value).unwrap();
                }
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_parse_xlsx_skips_header_and_renders_numbers() {
        let data = xlsx_bytes(&[
            &["序号", "题目", "答案", "分值"],
            &["1", "查看目录", "ls -l", "5"],
            &["2", "当前路径", "pwd", "2.5"],
        ]);
        let sheet = parse_xlsx(&data).unwrap();
        assert_eq!(sheet.header, vec!["序号", "题目", "答案", "分值"]);
        assert_eq!(sheet.column_count, 4);
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0], vec!["1", "查看目录", "ls -l", "5"]);
        assert_eq!(sheet.rows[1][3], "2.5");
    }

    #[test]
    fn test_parse_xlsx_header_only_is_empty() {
        let data = xlsx_bytes(&[&["序号", "题目", "答案"]]);
        let sheet = parse_xlsx(&data).unwrap();
        assert!(sheet.is_empty());
        assert_eq!(sheet.column_count, 3);
    }

    #[test]
    fn test_parse_workbook_detects_format() {
        let data = xlsx_bytes(&[&["序号", "题目"], &["1", "查看目录"]]);
        let sheet = parse_workbook(&data).unwrap();
        assert_eq!(sheet.header, vec!["序号", "题目"]);
        assert_eq!(sheet.rows, vec![vec!["1", "查看目录"]]);
        assert!(parse_workbook(b"plain text").is_err());
    }

    #[test]
    fn test_parse_csv_pads_short_rows() {
        let data = "\u{FEFF}序号,题目,答案,分值\n1,查看目录,ls -l\n\n2,当前路径,pwd,3\n";
        let sheet = parse_csv(data.as_bytes()).unwrap();
        assert_eq!(sheet.column_count, 4);
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0], vec!["1", "查看目录", "ls -l", ""]);
        assert_eq!(sheet.rows[1][3], "3");
    }

    #[test]
    fn test_parse_sheet_rejects_unknown_extension() {
        let err = parse_sheet("2401_张三.txt", b"abc").unwrap_err();
        assert!(matches!(err, GraderError::Validation(_)));
        assert!(parse_sheet("2401_张三.xlsx", b"not a zip").is_err());
    }

    #[test]
    fn test_csv_export_has_bom() {
        let data = write_csv_with_bom(
            &["id", "name"],
            vec![vec!["1".to_string(), "张三".to_string()]],
        )
        .unwrap();
        assert!(data.starts_with("\u{FEFF}".as_bytes()));
        let text = String::from_utf8(data).unwrap();
        assert!(text.contains("id,name\n1,张三\n"));
    }

    #[test]
    fn test_templates_round_trip_through_parser() {
        let standard = parse_xlsx(&build_template(TemplateKind::Standard).unwrap()).unwrap();
        assert_eq!(standard.column_count, 4);
        assert_eq!(standard.rows[0][3], "5");

        let answer = parse_xlsx(&build_template(TemplateKind::Answer).unwrap()).unwrap();
        assert_eq!(answer.column_count, 3);
        assert_eq!(TemplateKind::parse("answer"), Some(TemplateKind::Answer));
        assert_eq!(TemplateKind::parse("other"), None);
    }
}
