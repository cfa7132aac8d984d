//! Built-in language definitions.
//!
//! Each function builds a new [`LanguageDefinition`]. Callers that switch languages often can
//! keep the returned value around; nothing here is cached.

use crate::{LanguageDefinition, SyntaxCategory};

const BUILTIN_FUNCTION: &str = "Built-in function";

const C_STRING: &str = r#"L?"(\\.|[^"])*""#;
const C_CHAR: &str = r#"'\\?[^']'"#;
const HEX_NUMBER: &str = r"0[xX][0-9a-fA-F]+[uU]?[lL]?[lL]?";
const FLOAT_NUMBER: &str = r"[+-]?([0-9]+([.][0-9]*)?|[.][0-9]+)([eE][+-]?[0-9]+)?[fF]?";
const OCTAL_NUMBER: &str = r"0[0-7]+[uU]?[lL]?[lL]?";
const INT_NUMBER: &str = r"[+-]?[0-9]+[uU]?[lL]?[lL]?";
const IDENTIFIER: &str = r"[a-zA-Z_][a-zA-Z0-9_]*";
const PUNCTUATION: &str = r"[\[\]{}!%^&*()\-+=~|<>?/;,.]";
const PREPROCESSOR: &str = r"[ \t]*#[ \t]*[a-zA-Z_]+";

const C_KEYWORDS: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
    "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch", "typedef",
    "union", "unsigned", "void", "volatile", "while", "_Alignas", "_Alignof", "_Atomic", "_Bool",
    "_Complex", "_Generic", "_Imaginary", "_Noreturn", "_Static_assert", "_Thread_local",
];

const C_FUNCTIONS: &[&str] = &[
    "abort", "abs", "acos", "asin", "atan", "atexit", "atof", "atoi", "atol", "ceil", "clock",
    "cosh", "ctime", "div", "exit", "fabs", "floor", "fmod", "getchar", "getenv", "isalnum",
    "isalpha", "isdigit", "isgraph", "ispunct", "isspace", "isupper", "kbhit", "log10", "log2",
    "log", "memcmp", "modf", "pow", "printf", "sprintf", "snprintf", "putchar", "putenv", "puts",
    "rand", "remove", "rename", "sinh", "sqrt", "srand", "strcat", "strcmp", "strerror", "time",
    "tolower", "toupper",
];

const C_PREPROC: &[&str] = &[
    "define", "elif", "else", "endif", "error", "if", "ifdef", "ifndef", "include", "line",
    "pragma", "undef",
];

const CPP_KEYWORDS: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool", "break",
    "case", "catch", "char", "char16_t", "char32_t", "class", "compl", "concept", "const",
    "constexpr", "const_cast", "continue", "decltype", "default", "delete", "do", "double",
    "dynamic_cast", "else", "enum", "explicit", "export", "extern", "false", "float", "for",
    "friend", "goto", "if", "import", "inline", "int", "long", "module", "mutable", "namespace",
    "new", "noexcept", "not", "not_eq", "nullptr", "operator", "or", "or_eq", "private",
    "protected", "public", "register", "reinterpret_cast", "requires", "return", "short",
    "signed", "sizeof", "static", "static_assert", "static_cast", "struct", "switch",
    "template", "this", "thread_local", "throw", "true", "try", "typedef", "typeid", "typename",
    "union", "unsigned", "using", "virtual", "void", "volatile", "wchar_t", "while", "xor",
    "xor_eq",
];

const CPP_IDENTIFIERS: &[&str] = &[
    "std", "string", "vector", "map", "unordered_map", "set", "unordered_set", "min", "max",
];

const ANGELSCRIPT_KEYWORDS: &[&str] = &[
    "and", "abstract", "auto", "bool", "break", "case", "cast", "class", "const", "continue",
    "default", "do", "double", "else", "enum", "false", "final", "float", "for", "from",
    "funcdef", "function", "get", "if", "import", "in", "inout", "int", "interface", "int8",
    "int16", "int32", "int64", "is", "mixin", "namespace", "not", "null", "or", "out",
    "override", "private", "protected", "return", "set", "shared", "super", "switch", "this",
    "true", "typedef", "uint", "uint8", "uint16", "uint32", "uint64", "void", "while", "xor",
];

const ANGELSCRIPT_FUNCTIONS: &[&str] = &[
    "cos", "sin", "tab", "acos", "asin", "atan", "atan2", "cosh", "sinh", "tanh", "log", "log10",
    "pow", "sqrt", "abs", "ceil", "floor", "fraction", "closeTo", "fpFromIEEE", "fpToIEEE",
    "complex", "opEquals", "opAddAssign", "opSubAssign", "opMulAssign", "opDivAssign", "opAdd",
    "opSub", "opMul", "opDiv",
];

const LUA_KEYWORDS: &[&str] = &[
    "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "goto", "if", "in",
    "local", "nil", "not", "or", "repeat", "return", "then", "true", "until", "while",
];

const LUA_FUNCTIONS: &[&str] = &[
    "assert", "collectgarbage", "dofile", "error", "getmetatable", "ipairs", "loadfile", "load",
    "loadstring", "next", "pairs", "pcall", "print", "rawequal", "rawlen", "rawget", "rawset",
    "select", "setmetatable", "tonumber", "tostring", "type", "xpcall", "_G", "_VERSION",
    "require", "module", "coroutine", "table", "io", "os", "string", "utf8", "bit32", "math",
    "debug", "package", "abs", "ceil", "floor", "max", "min", "sqrt", "random", "format", "gsub",
    "gmatch", "match", "find", "sub", "upper", "lower", "rep", "reverse", "insert", "remove",
    "concat", "sort", "unpack", "pack",
];

const SQL_KEYWORDS: &[&str] = &[
    "ADD", "ALL", "ALTER", "AND", "ANY", "AS", "ASC", "BACKUP", "BEGIN", "BETWEEN", "BREAK", "BY",
    "CASCADE", "CASE", "CHECK", "CLOSE", "COLUMN", "COMMIT", "CONSTRAINT", "CONTINUE", "CREATE",
    "CROSS", "CURRENT", "CURSOR", "DATABASE", "DECLARE", "DEFAULT", "DELETE", "DESC", "DISTINCT",
    "DROP", "ELSE", "END", "ESCAPE", "EXCEPT", "EXEC", "EXECUTE", "EXISTS", "EXIT", "FETCH",
    "FOR", "FOREIGN", "FROM", "FULL", "FUNCTION", "GOTO", "GRANT", "GROUP", "HAVING", "IF", "IN",
    "INDEX", "INNER", "INSERT", "INTERSECT", "INTO", "IS", "JOIN", "KEY", "LEFT", "LIKE", "NOT",
    "NULL", "OF", "OFF", "ON", "OPEN", "OR", "ORDER", "OUTER", "PRIMARY", "PROCEDURE",
    "REFERENCES", "RETURN", "REVOKE", "RIGHT", "ROLLBACK", "SCHEMA", "SELECT", "SET", "TABLE",
    "THEN", "TO", "TOP", "TRANSACTION", "TRIGGER", "TRUNCATE", "UNION", "UNIQUE", "UPDATE",
    "USE", "VALUES", "VIEW", "WHEN", "WHERE", "WHILE", "WITH",
];

const SQL_FUNCTIONS: &[&str] = &[
    "ABS", "AVG", "CAST", "CEIL", "COALESCE", "CONCAT", "CONVERT", "COUNT", "CURRENT_DATE",
    "CURRENT_TIMESTAMP", "FLOOR", "GREATEST", "LEAST", "LENGTH", "LOWER", "LPAD", "LTRIM", "MAX",
    "MIN", "MOD", "NULLIF", "NVL", "POWER", "REPLACE", "ROUND", "RPAD", "RTRIM", "SIGN",
    "SQRT", "SUBSTR", "SUM", "SYSDATE", "TO_CHAR", "TO_DATE", "TO_NUMBER", "TRIM", "TRUNC",
    "UPPER",
];

const GLSL_KEYWORDS: &[&str] = &[
    "attribute", "bool", "break", "buffer", "bvec2", "bvec3", "bvec4", "case", "centroid",
    "coherent", "const", "continue", "default", "discard", "do", "double", "dmat2", "dmat3",
    "dmat4", "dvec2", "dvec3", "dvec4", "else", "false", "flat", "float", "for", "highp", "if",
    "in", "inout", "int", "invariant", "ivec2", "ivec3", "ivec4", "layout", "lowp", "mat2",
    "mat3", "mat4", "mediump", "noperspective", "out", "patch", "precision", "readonly",
    "restrict", "return", "sample", "sampler1D", "sampler2D", "sampler3D", "samplerCube",
    "shared", "smooth", "struct", "subroutine", "switch", "true", "uint", "uniform", "uvec2",
    "uvec3", "uvec4", "varying", "vec2", "vec3", "vec4", "void", "volatile", "while",
    "writeonly",
];

const GLSL_FUNCTIONS: &[&str] = &[
    "abs", "acos", "all", "any", "asin", "atan", "ceil", "clamp", "cos", "cross", "degrees",
    "dFdx", "dFdy", "distance", "dot", "exp", "exp2", "faceforward", "floor", "fract",
    "inversesqrt", "length", "log", "log2", "max", "min", "mix", "mod", "normalize", "not",
    "pow", "radians", "reflect", "refract", "sign", "sin", "smoothstep", "sqrt", "step", "tan",
    "texture", "texture2D", "textureCube", "textureLod", "transpose",
];

const HLSL_KEYWORDS: &[&str] = &[
    "AppendStructuredBuffer", "asm", "BlendState", "bool", "bool2", "bool3", "bool4", "break",
    "Buffer", "ByteAddressBuffer", "case", "cbuffer", "centroid", "class", "column_major",
    "compile", "const", "continue", "ComputeShader", "ConsumeStructuredBuffer", "default",
    "DepthStencilState", "discard", "do", "double", "double2", "double3", "double4",
    "DomainShader", "dword", "else", "export", "extern", "false", "float", "float2", "float3",
    "float4", "float2x2", "float3x3", "float4x4", "float3x4", "float4x3", "for",
    "GeometryShader", "groupshared", "half", "half2", "half3", "half4", "HullShader", "if", "in",
    "inline", "inout", "InputPatch", "int", "int2", "int3", "int4", "interface", "line",
    "lineadj", "linear", "LineStream", "matrix", "min16float", "min10float", "min16int",
    "min12int", "min16uint", "namespace", "nointerpolation", "noperspective", "NULL", "out",
    "OutputPatch", "packoffset", "pass", "PixelShader", "point", "PointStream", "precise",
    "RasterizerState", "return", "register", "row_major", "RWBuffer", "RWByteAddressBuffer",
    "RWStructuredBuffer", "RWTexture1D", "RWTexture2D", "RWTexture3D", "sample", "sampler",
    "SamplerState", "SamplerComparisonState", "shared", "snorm", "static", "string", "struct",
    "switch", "StructuredBuffer", "tbuffer", "technique", "technique11", "texture", "Texture1D",
    "Texture2D", "Texture2DArray", "Texture3D", "TextureCube", "triangle", "triangleadj",
    "TriangleStream", "true", "typedef", "uint", "uint2", "uint3", "uint4", "uniform", "unorm",
    "unsigned", "vector", "VertexShader", "void", "volatile", "while",
];

const HLSL_FUNCTIONS: &[&str] = &[
    "abs", "acos", "all", "AllMemoryBarrier", "any", "asfloat", "asin", "asint", "asuint",
    "atan", "atan2", "ceil", "clamp", "clip", "cos", "cosh", "countbits", "cross", "ddx", "ddy",
    "degrees", "determinant", "distance", "dot", "exp", "exp2", "faceforward", "firstbithigh",
    "firstbitlow", "floor", "fma", "fmod", "frac", "frexp", "fwidth", "GroupMemoryBarrier",
    "InterlockedAdd", "InterlockedMax", "InterlockedMin", "isfinite", "isinf", "isnan", "ldexp",
    "length", "lerp", "lit", "log", "log10", "log2", "mad", "max", "min", "modf", "mul",
    "normalize", "pow", "radians", "rcp", "reflect", "refract", "reversebits", "round", "rsqrt",
    "saturate", "sign", "sin", "sincos", "sinh", "smoothstep", "sqrt", "step", "tan", "tanh",
    "tex2D", "tex2Dlod", "tex3D", "texCUBE", "transpose", "trunc",
];

const BASIC8_KEYWORDS: &[&str] = &[
    "nil", "true", "false", "mod", "and", "or", "not", "is", "let", "dim", "if", "then",
    "elseif", "else", "endif", "for", "in", "to", "step", "next", "while", "wend", "do", "until",
    "exit", "goto", "gosub", "return", "call", "def", "enddef", "class", "endclass", "new", "var",
    "reflect", "lambda", "import", "type", "typeof",
];

const BASIC8_FUNCTIONS: &[&str] = &[
    "abs", "sgn", "sqr", "floor", "ceil", "fix", "round", "srnd", "rnd", "sin", "cos", "tan",
    "asin", "acos", "atan", "exp", "log", "asc", "chr", "left", "mid", "right", "str", "val",
    "mem", "end", "len", "get", "set", "print", "input", "list", "dict", "push", "pop", "back",
    "insert", "sort", "exists", "index_of", "remove", "clear", "clone", "to_array", "iterator",
    "move_next", "ticks", "now", "trace", "raise", "gc", "beep", "open", "close", "read",
    "write", "read_line", "write_line", "load", "save", "coroutine", "yield", "wait_for", "rgba",
    "sleep", "msgbox", "pi", "deg", "rad", "min", "max", "vec2", "vec3", "vec4", "dot", "cross",
    "normalize", "length", "distance", "lerp", "lcase", "ucase", "split", "starts_with",
    "ends_with", "assert", "swap", "iif", "cls", "col", "text", "line", "circ", "rect", "spr",
    "map", "pget", "pset", "key", "keyp", "btn", "btnp",
];

/// A definition with no token patterns; every glyph stays [`SyntaxCategory::Default`].
pub fn plain_text() -> LanguageDefinition {
    LanguageDefinition::new("Plain Text")
}

fn c_family_patterns(def: LanguageDefinition) -> LanguageDefinition {
    def.with_pattern(r"//.*", SyntaxCategory::Comment)
        .with_pattern(PREPROCESSOR, SyntaxCategory::Preprocessor)
        .with_pattern(C_STRING, SyntaxCategory::String)
        .with_pattern(C_CHAR, SyntaxCategory::CharLiteral)
        .with_pattern(HEX_NUMBER, SyntaxCategory::Number)
        .with_pattern(FLOAT_NUMBER, SyntaxCategory::Number)
        .with_pattern(OCTAL_NUMBER, SyntaxCategory::Number)
        .with_pattern(INT_NUMBER, SyntaxCategory::Number)
        .with_pattern(IDENTIFIER, SyntaxCategory::Identifier)
        .with_pattern(PUNCTUATION, SyntaxCategory::Punctuation)
        .with_block_comment("/*", "*/")
}

/// C (C11 keyword set).
pub fn c() -> LanguageDefinition {
    c_family_patterns(
        LanguageDefinition::new("C")
            .with_keywords(C_KEYWORDS.iter().copied())
            .with_identifiers(C_FUNCTIONS.iter().copied(), BUILTIN_FUNCTION)
            .with_preproc_identifiers(C_PREPROC.iter().copied(), "Preprocessor directive"),
    )
}

/// C++ (C++20 keyword set).
pub fn cpp() -> LanguageDefinition {
    c_family_patterns(
        LanguageDefinition::new("C++")
            .with_keywords(CPP_KEYWORDS.iter().copied())
            .with_identifiers(C_FUNCTIONS.iter().copied(), BUILTIN_FUNCTION)
            .with_identifiers(CPP_IDENTIFIERS.iter().copied(), "Standard library")
            .with_preproc_identifiers(C_PREPROC.iter().copied(), "Preprocessor directive"),
    )
}

/// AngelScript.
pub fn angel_script() -> LanguageDefinition {
    LanguageDefinition::new("AngelScript")
        .with_keywords(ANGELSCRIPT_KEYWORDS.iter().copied())
        .with_identifiers(ANGELSCRIPT_FUNCTIONS.iter().copied(), BUILTIN_FUNCTION)
        .with_pattern(r"//.*", SyntaxCategory::Comment)
        .with_pattern(C_STRING, SyntaxCategory::String)
        .with_pattern(C_CHAR, SyntaxCategory::String)
        .with_pattern(HEX_NUMBER, SyntaxCategory::Number)
        .with_pattern(FLOAT_NUMBER, SyntaxCategory::Number)
        .with_pattern(OCTAL_NUMBER, SyntaxCategory::Number)
        .with_pattern(INT_NUMBER, SyntaxCategory::Number)
        .with_pattern(IDENTIFIER, SyntaxCategory::Identifier)
        .with_pattern(PUNCTUATION, SyntaxCategory::Punctuation)
        .with_block_comment("/*", "*/")
}

/// Lua 5.x.
pub fn lua() -> LanguageDefinition {
    LanguageDefinition::new("Lua")
        .with_keywords(LUA_KEYWORDS.iter().copied())
        .with_identifiers(LUA_FUNCTIONS.iter().copied(), BUILTIN_FUNCTION)
        .with_pattern(r"--.*", SyntaxCategory::Comment)
        .with_pattern(C_STRING, SyntaxCategory::String)
        .with_pattern(r"'[^']*'", SyntaxCategory::String)
        .with_pattern(HEX_NUMBER, SyntaxCategory::Number)
        .with_pattern(FLOAT_NUMBER, SyntaxCategory::Number)
        .with_pattern(INT_NUMBER, SyntaxCategory::Number)
        .with_pattern(IDENTIFIER, SyntaxCategory::Identifier)
        .with_pattern(PUNCTUATION, SyntaxCategory::Punctuation)
        .with_block_comment("--[[", "]]")
}

/// SQL (case-insensitive keywords).
pub fn sql() -> LanguageDefinition {
    LanguageDefinition::new("SQL")
        .with_keywords(SQL_KEYWORDS.iter().copied())
        .with_identifiers(SQL_FUNCTIONS.iter().copied(), BUILTIN_FUNCTION)
        .with_pattern(r"--.*", SyntaxCategory::Comment)
        .with_pattern(C_STRING, SyntaxCategory::String)
        .with_pattern(r"'[^']*'", SyntaxCategory::String)
        .with_pattern(HEX_NUMBER, SyntaxCategory::Number)
        .with_pattern(FLOAT_NUMBER, SyntaxCategory::Number)
        .with_pattern(OCTAL_NUMBER, SyntaxCategory::Number)
        .with_pattern(INT_NUMBER, SyntaxCategory::Number)
        .with_pattern(IDENTIFIER, SyntaxCategory::Identifier)
        .with_pattern(PUNCTUATION, SyntaxCategory::Punctuation)
        .with_block_comment("/*", "*/")
        .with_case_sensitive(false)
}

/// GLSL.
pub fn glsl() -> LanguageDefinition {
    c_family_patterns(
        LanguageDefinition::new("GLSL")
            .with_keywords(GLSL_KEYWORDS.iter().copied())
            .with_identifiers(GLSL_FUNCTIONS.iter().copied(), BUILTIN_FUNCTION),
    )
}

/// HLSL.
pub fn hlsl() -> LanguageDefinition {
    c_family_patterns(
        LanguageDefinition::new("HLSL")
            .with_keywords(HLSL_KEYWORDS.iter().copied())
            .with_identifiers(HLSL_FUNCTIONS.iter().copied(), BUILTIN_FUNCTION),
    )
}

/// BASIC8.
///
/// Keywords are case-insensitive. Block comments are written `'[ ... ']`; a doubled quote
/// (`''[`) does not open one.
pub fn basic8() -> LanguageDefinition {
    LanguageDefinition::new("BASIC8")
        .with_keywords(BASIC8_KEYWORDS.iter().copied())
        .with_identifiers(BASIC8_FUNCTIONS.iter().copied(), "Library function")
        .with_pattern(r"'.*|rem$|rem[ \t](.*)?", SyntaxCategory::Comment)
        .with_pattern(C_STRING, SyntaxCategory::String)
        .with_pattern(r"0x[0-9a-f]+", SyntaxCategory::Number)
        .with_pattern(
            r"[+-]?([0-9]+([.][0-9]*)?|[.][0-9]+)(e[+-]?[0-9]+)?",
            SyntaxCategory::Number,
        )
        .with_pattern(r"[_]*[a-z_][a-z0-9_]*[$]?", SyntaxCategory::Identifier)
        .with_pattern(r"[~*/+\-^()=<>.]", SyntaxCategory::Punctuation)
        .with_block_comment("'[", "']")
        .with_comment_escape('\'')
        .with_case_sensitive(false)
}
