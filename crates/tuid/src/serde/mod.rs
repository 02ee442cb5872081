mod tuid;
